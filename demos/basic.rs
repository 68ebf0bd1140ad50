//! Minimal baton example — one synchronous and one asynchronous pipeline.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! The last stack deliberately falls through every handler so you can see
//! the termination sentinel fire (watch the log line carrying the stack
//! name).

use std::sync::Arc;

use baton::{AsyncNext, AsyncStack, BoxFuture, Error, Next, Options, Stack};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // A synchronous pipeline: normalize the input, then answer.
    let greeting: Stack<String, String> = Stack::new(
        "greeting",
        vec![Arc::new(trim_input), Arc::new(greet)],
    );
    println!("{}", greeting.run("  World  ".into()).expect("greeting pipeline"));

    // The async variant has the identical shape; handlers may await their
    // own work before delegating or answering.
    let lookup: AsyncStack<String, String> = AsyncStack::new(
        "user-lookup",
        vec![Arc::new(authorize), Arc::new(fetch_user)],
    );
    println!("{}", lookup.run("user-42".into()).await.expect("lookup pipeline"));

    // No handler ever answers here, so the run cannot succeed: the sentinel
    // fails it with the stack's name instead of returning nothing.
    let empty: Stack<String, String> = Stack::new("forgotten-pipeline", Vec::new());
    if let Err(err) = empty.run("anything".into()) {
        println!("fell off the end: {err}");
    }
}

// Transforms the input and passes it along.
fn trim_input(input: String, next: Next<String, String>, options: &Options) -> Result<String, Error> {
    next.call(input.trim().to_owned(), options)
}

// Answers directly — the run ends here and `greet`'s successor never runs.
fn greet(input: String, _next: Next<String, String>, _options: &Options) -> Result<String, Error> {
    Ok(format!("Hello, {input}!"))
}

// Rejects unknown callers, delegates the rest. A real pipeline would await a
// token check here.
fn authorize(
    input: String,
    next: AsyncNext<String, String>,
    options: Options,
) -> BoxFuture<Result<String, Error>> {
    Box::pin(async move {
        if !input.starts_with("user-") {
            return Err((options.on_error)(Error::handler("unknown principal")));
        }
        next.call(input, options).await
    })
}

fn fetch_user(
    input: String,
    _next: AsyncNext<String, String>,
    _options: Options,
) -> BoxFuture<Result<String, Error>> {
    Box::pin(async move {
        // Real app: query a store here.
        tokio::task::yield_now().await;
        Ok(format!(r#"{{"id":"{input}","name":"alice"}}"#))
    })
}
