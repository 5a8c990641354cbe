use std::process::exit;

#[tokio::main]
async fn main() {
    exit(bucket_util::main_rs().await);
}
