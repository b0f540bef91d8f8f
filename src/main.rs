use std::collections::HashMap;
use std::sync::Arc;

use httpwire::config::Config;
use httpwire::http::request::Request;
use httpwire::http::response::StatusCode;
use httpwire::http::writer::ResponseWriter;
use httpwire::server::{self, HandlerError};

const OK_PAGE: &str = r#"<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>
"#;

const BAD_REQUEST_PAGE: &str = r#"<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>
"#;

const INTERNAL_ERROR_PAGE: &str = r#"<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>
"#;

fn app_handler(w: &mut ResponseWriter, req: &Request) -> Result<(), HandlerError> {
    let (status, page) = match req.request_line.target.as_str() {
        "/yourproblem" => (StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE),
        "/myproblem" => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_PAGE),
        _ => (StatusCode::OK, OK_PAGE),
    };

    w.write_status_line(status)?;
    w.write_headers(HashMap::from([(
        "Content-Type".to_string(),
        "text/html".to_string(),
    )]))?;
    w.write_body(page.as_bytes())?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    tokio::select! {
        res = server::listener::run(&cfg, Arc::new(app_handler)) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
