use clap::Parser;
use std::io::Write;
use visual_audit::config::{Cli, Command, Settings, TomlConfig};
use visual_audit::core::chat::GREETING;
use visual_audit::core::engine::AuditReport;
use visual_audit::domain::ports::GenerativeBackend;
use visual_audit::utils::{logger, validation::Validate};
use visual_audit::{AuditEngine, AuditSession, ChatClient, GeminiBackend, LocalImageStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.config.verbose);

    tracing::info!("Starting visual-audit CLI");
    if cli.config.verbose {
        tracing::debug!("CLI config: {:?}", cli.config);
    }

    let file_config = match cli.config.config_file.as_deref() {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::error!("❌ Failed to load config profile {}: {}", path, e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let settings = Settings::resolve(&cli.config, file_config.as_ref());
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let backend = GeminiBackend::from_config(&settings);

    match cli.command {
        Command::Analyze { image, prompt, json } => {
            let store = LocalImageStore::new(".".to_string());
            let engine = AuditEngine::new(store, backend);

            match engine.run(&image, &prompt).await {
                Ok(report) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        print_report(&report);
                    }
                }
                Err(e) => {
                    tracing::error!("❌ Analysis failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Chat => {
            run_chat(ChatClient::new(backend)).await?;
        }
    }

    Ok(())
}

fn print_report(report: &AuditReport) {
    println!("✅ Analysis complete\n");
    println!("{}", report.answer);

    if report.detections.is_empty() {
        return;
    }

    println!("\nDetected items ({}):", report.detections.len());
    for detection in &report.detections {
        match detection.overlay {
            Some(rect) => println!(
                "  📦 {} @ top {:.1}% left {:.1}% ({:.1}% x {:.1}%)",
                detection.item.label, rect.top, rect.left, rect.width, rect.height
            ),
            None => println!("  ⚠️ {} (degenerate box, not rendered)", detection.item.label),
        }
    }
}

async fn run_chat<B: GenerativeBackend>(
    client: ChatClient<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = AuditSession::new();
    session.push_model(GREETING);
    println!("assistant> {}", GREETING);
    println!("(type 'exit' to quit)\n");

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        // History up to (but not including) the new message is replayed.
        let reply = client.send(&session.history, message).await;
        session.push_user(message);
        session.push_model(reply.clone());
        println!("assistant> {}", reply);
    }

    Ok(())
}
