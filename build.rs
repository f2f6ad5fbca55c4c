use std::env;
use std::fs;
use std::path::Path;

// Variables que se inyectan en compilación (leídas con option_env! en config.rs)
const FORWARDED_KEYS: &[&str] = &["API_URL", "LOG_LEVEL"];

fn main() {
    // APP_ENV elige el archivo: prod -> .env.prod, qa -> .env.qa, resto -> .env
    let app_env = env::var("APP_ENV").unwrap_or_default();
    let env_file = match app_env.as_str() {
        "prod" => ".env.prod",
        "qa" => ".env.qa",
        _ => ".env",
    };

    println!("cargo:rerun-if-env-changed=APP_ENV");
    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed={}", env_file);
    println!("cargo:rerun-if-changed=build.rs");

    let path = Path::new(env_file);
    if !path.exists() {
        // En CI/producción las variables llegan por entorno, no es un error
        println!(
            "cargo:warning={} no encontrado, usando variables de entorno o valores por defecto",
            env_file
        );
        return;
    }

    let Ok(contents) = fs::read_to_string(path) else {
        println!("cargo:warning=No se pudo leer {}", env_file);
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // El entorno real tiene prioridad sobre el archivo
        if FORWARDED_KEYS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
