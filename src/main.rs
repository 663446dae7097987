use pinroute::config::Config;
use pinroute::error::Error;
use pinroute::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    serve(config).await
}
