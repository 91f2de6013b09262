/// Utilisée quand rien d'autre ne désigne le service de prédiction.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// `BACKEND_URL` tel que vu par le compilateur à la construction de la crate.
pub const BUILD_BACKEND_URL: Option<&str> = option_env!("BACKEND_URL");

/// Choisit l'origine du service : valeur explicite (option ou variable
/// d'environnement), puis valeur de compilation, puis [`DEFAULT_BACKEND_URL`].
pub fn resolve_backend_origin(configured: Option<&str>, build_time: Option<&str>) -> String {
    [configured, build_time]
        .into_iter()
        .flatten()
        .map(normalize)
        .find(|origin| !origin.is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

pub fn backend_origin(configured: Option<&str>) -> String {
    resolve_backend_origin(configured, BUILD_BACKEND_URL)
}

fn normalize(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_string()
}
