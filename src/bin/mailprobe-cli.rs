use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mailprobe_lib::{ProbeOptions, SocksProxy, VerificationOutcome, Verifier};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailprobe-cli")]
struct Cli {
    /// adresse e-mail à tester (`user@domain` ou `Name <user@domain>`)
    email: String,

    /// enveloppe MAIL FROM utilisée pour le sondage
    #[arg(long = "from", default_value = "postmaster@localhost")]
    source_addr: String,

    /// nom annoncé en HELO (par défaut: domaine de --from)
    #[arg(long)]
    helo: Option<String>,

    /// port SMTP
    #[arg(long, default_value_t = 25)]
    port: u16,

    /// timeout connexion/commande (ms)
    #[arg(long = "timeout", default_value_t = 5_000)]
    timeout_ms: u64,

    /// proxy SOCKS5 (host:port)
    #[arg(long)]
    proxy: Option<String>,

    /// identifiant du proxy
    #[arg(long = "proxy-user", requires = "proxy")]
    proxy_user: Option<String>,

    /// mot de passe du proxy
    #[arg(long = "proxy-pass", requires = "proxy_user")]
    proxy_pass: Option<String>,

    /// format: human|json
    #[arg(long, default_value = "human")]
    format: String,
}

fn parse_proxy(cli: &Cli) -> Result<Option<SocksProxy>> {
    let Some(spec) = cli.proxy.as_deref() else {
        return Ok(None);
    };
    let (host, port) = spec
        .rsplit_once(':')
        .with_context(|| format!("--proxy '{spec}' attendu au format host:port"))?;
    let port: u16 = port
        .parse()
        .with_context(|| format!("port proxy invalide: '{port}'"))?;
    let proxy = match (&cli.proxy_user, &cli.proxy_pass) {
        (Some(user), Some(pass)) => SocksProxy::with_auth(host, port, user, pass),
        _ => SocksProxy::new(host, port),
    };
    Ok(Some(proxy))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let timeout = Duration::from_millis(cli.timeout_ms);
    let options = ProbeOptions {
        port: cli.port,
        helo_name: cli.helo.clone(),
        connect_timeout: timeout,
        command_timeout: timeout,
    };

    let outcome = match parse_proxy(&cli)? {
        Some(proxy) => {
            Verifier::via_proxy(&cli.source_addr, proxy, options).verify(&cli.email)?
        }
        None => Verifier::with_options(&cli.source_addr, options).verify(&cli.email)?,
    };

    match cli.format.as_str() {
        "human" => print_human(&outcome),
        "json" => {
            #[cfg(feature = "with-serde")]
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=json nécessite la feature 'with-serde'");
                std::process::exit(1);
            }
        }
        other => bail!("unknown --format '{other}', use: human|json"),
    }

    // codes de sortie : 0 délivrable, 2 non délivrable/injoignable, 1 fatal
    if !outcome.deliverable {
        std::process::exit(2);
    }
    Ok(())
}

fn print_human(outcome: &VerificationOutcome) {
    let addr = outcome.address.addr();
    if !outcome.mx_reachable {
        println!("[UNREACHABLE] {addr} :: no mail exchanger reachable");
    } else if outcome.catch_all {
        println!("[CATCH-ALL]   {addr} :: domain accepts any recipient");
    } else if outcome.deliverable {
        println!("[DELIVERABLE] {addr}");
    } else {
        println!("[REJECTED]    {addr}");
    }
}
