use axum::response::Html;

fn page(title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title} · Learnpath</title></head>\
         <body><main id=\"app\" data-page=\"{title}\"></main></body></html>\n"
    ))
}

pub async fn dashboard_page() -> Html<String> {
    page("Dashboard")
}

pub async fn paths_page() -> Html<String> {
    page("Paths")
}

pub async fn signin_page() -> Html<String> {
    page("Sign in")
}

pub async fn signup_page() -> Html<String> {
    page("Sign up")
}
