use anyhow::{Result, ensure};
use clap::Parser;
use records::remote::RecorderClient;

/// Smoke test against a running recorder.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(default_value = "http://localhost:3000")]
    base_url: String,

    #[arg(short, long, default_value = "test")]
    message: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = RecorderClient::new(args.base_url);

    let health = client.health().await?;
    println!("Health: {} (up {:.1}s)", health.status, health.uptime);

    let before = client.responses().await?.count;
    println!("Responses before: {before}");

    let created = client.record_yes(Some(&args.message)).await?;
    println!(
        "Recorded {} at {}",
        created.data.id,
        records::format_timestamp(&created.data.timestamp)
    );

    ensure!(created.success, "recorder reported failure");
    ensure!(created.data.message == args.message, "message was not stored verbatim");
    ensure!(
        created.total_responses == before + 1,
        "expected {} responses, recorder says {}",
        before + 1,
        created.total_responses
    );

    let listed = client.responses().await?;
    ensure!(
        listed.responses.contains(&created.data),
        "new record missing from /responses"
    );

    println!("Responses after: {}", listed.count);
    println!("OK");

    Ok(())
}
