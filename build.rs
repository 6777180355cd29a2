use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Cargar variables de entorno desde .env si existe
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                // Ignorar comentarios y líneas vacías
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // Parsear KEY=VALUE (solo claves del shell, el resto es de otros módulos)
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !key.starts_with("SHELL_") {
                        continue;
                    }

                    // Solo configurar si no está ya definida
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in [
        "SHELL_DEFAULT_ROUTE",
        "SHELL_ENABLE_LOGGING",
        "SHELL_LOG_LEVEL",
        "SHELL_PROGRESS_MS",
        "SHELL_LOADER_FADE_MS",
        "SHELL_LOADER_SAFETY_MS",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
