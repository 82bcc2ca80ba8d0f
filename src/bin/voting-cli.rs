use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "voting-cli")]
#[command(about = "Drive the voting gateway HTTP API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidates with their vote counts
    Candidates,
    /// Show the current winner
    Winner,
    /// Build an addCandidate transaction (sign and submit with a key)
    AddCandidate {
        #[arg(long)]
        address: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        metadata: String,
        /// Testnet key; when set the intent is signed and submitted
        #[arg(long, env = "VOTING_TESTNET_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },
    /// Build a vote transaction (sign and submit with a key)
    Vote {
        #[arg(long)]
        address: String,
        #[arg(long)]
        candidate_id: u64,
        /// Testnet key; when set the intent is signed and submitted
        #[arg(long, env = "VOTING_TESTNET_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Candidates => {
            let res = client.get(format!("{}/voting/candidates", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Winner => {
            let res = client.get(format!("{}/voting/winner", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::AddCandidate {
            address,
            name,
            metadata,
            private_key,
        } => {
            let body = json!({
                "address": address,
                "candidate": { "name": name, "metadata": metadata },
            });
            transact(&client, &cli.url, "/voting/candidates", body, private_key).await?;
        }
        Commands::Vote {
            address,
            candidate_id,
            private_key,
        } => {
            let body = json!({ "address": address, "candidateId": candidate_id });
            transact(&client, &cli.url, "/voting/vote", body, private_key).await?;
        }
    }

    Ok(())
}

/// Build an intent, then sign and submit it through `/testnet/*` if a key is given.
async fn transact(
    client: &reqwest::Client,
    url: &str,
    path: &str,
    body: Value,
    private_key: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let res = client.post(format!("{}{}", url, path)).json(&body).send().await?;
    let Some(key) = private_key else {
        return print_response(res).await;
    };
    let Some(intent) = json_or_report(res).await? else {
        return Ok(());
    };

    let res = client
        .post(format!("{}/testnet/sign", url))
        .json(&json!({ "testnetPrivateKey": key, "transactionObject": intent }))
        .send()
        .await?;
    let Some(signed) = json_or_report(res).await? else {
        return Ok(());
    };

    let res = client
        .post(format!("{}/testnet/submit", url))
        .json(&json!({ "signedTransaction": signed }))
        .send()
        .await?;
    print_response(res).await
}

async fn json_or_report(res: reqwest::Response) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        return Ok(None);
    }
    Ok(Some(res.json().await?))
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(json) = json_or_report(res).await? {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
