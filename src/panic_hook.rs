// src/panic_hook.rs
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::error;

tokio::task_local! {
    static IN_REQUEST: ();
}

/// Marks everything polled under it as request handling, so a panic there is
/// left to `CatchPanicLayer` instead of being treated as fatal.
pub async fn mark_request(req: Request, next: Next) -> Response {
    IN_REQUEST.scope((), next.run(req)).await
}

pub fn in_request() -> bool {
    IN_REQUEST.try_with(|_| ()).is_ok()
}

/// Log every panic. Outside request handling, `exit_on_panic` takes the
/// process down.
pub fn install(exit_on_panic: bool) {
    install_with(exit_on_panic, || std::process::exit(1));
}

pub fn install_with(exit_on_panic: bool, on_fatal: impl Fn() + Send + Sync + 'static) {
    std::panic::set_hook(Box::new(move |info| {
        if in_request() {
            error!("Panic while handling request: {}", info);
            return;
        }

        error!("Uncaught panic: {}", info);
        if exit_on_panic {
            on_fatal();
        }
    }));
}
