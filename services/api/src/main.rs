use pavement_condition_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("pavement condition error: {err}");
        std::process::exit(1);
    }
}
