use clap::Parser;
use masterchef_provisioner::core::plan::{ADAPTER_CONTRACT, TRACKER_CONTRACT};
use masterchef_provisioner::core::unit::MASTERCHEF_BALANCE_ADAPTER_ID;
use masterchef_provisioner::utils::error::ErrorSeverity;
use masterchef_provisioner::utils::{logger, validation::Validate};
use masterchef_provisioner::{
    ChainClient, CheckpointJournal, CliConfig, FileDeployer, LocalStorage, Provisioner,
    RpcExecutor, TomlConfig, TracingLogger, WiringGuard, MASTERCHEF_BALANCE_ADAPTER,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if let Err(e) = args.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if !MASTERCHEF_BALANCE_ADAPTER.matches_tags(&args.tags) {
        tracing::info!(
            "⏭️  Unit {} not selected by tags {:?}",
            MASTERCHEF_BALANCE_ADAPTER.id,
            args.tags
        );
        return Ok(());
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(guard) = args.guard {
        config.provision.get_or_insert_with(Default::default).guard = Some(guard);
        tracing::info!("🔧 Wiring guard overridden to: {:?}", guard);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let chain = match ChainClient::new(
        &config.rpc.url,
        config.rpc.from,
        config.poll_interval(),
        config.confirmation_timeout(),
    ) {
        Ok(chain) => Arc::new(chain),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let records = LocalStorage::new(config.deployments.directory.clone());
    let artifacts = LocalStorage::new(config.deployments.artifacts.clone());
    let deployer = FileDeployer::new(records.clone(), artifacts, &args.network, chain.clone());
    let executor = RpcExecutor::new(chain);

    let mut provisioner = Provisioner::new(config.registry(), deployer, executor, TracingLogger);
    if config.guard() == WiringGuard::Checkpoint {
        provisioner = provisioner.with_checkpoints(Box::new(CheckpointJournal::new(
            records,
            MASTERCHEF_BALANCE_ADAPTER_ID,
        )));
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be submitted");
        perform_dry_run(&provisioner, &args.network)?;
        return Ok(());
    }

    match provisioner.provision(&args.network).await {
        Ok(report) => {
            tracing::info!(
                "✅ Provisioning finished: {} executed, {} skipped",
                report.executed.len(),
                report.skipped.len()
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Err(e) => {
            tracing::error!(
                "❌ Provisioning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // 可重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn perform_dry_run<D, E, L>(
    provisioner: &Provisioner<D, E, L>,
    network: &str,
) -> masterchef_provisioner::Result<()>
where
    D: masterchef_provisioner::core::Deployer,
    E: masterchef_provisioner::core::Executor,
    L: masterchef_provisioner::core::ProvisionLogger,
{
    let farms = provisioner.preview(network)?;

    println!("Network: {}", network);
    println!("Guard:   {:?}", provisioner.guard());
    println!("1. deploy-or-fetch {}", ADAPTER_CONTRACT);
    println!("2. {}.addAdapter(<adapter>)  (only if newly deployed)", TRACKER_CONTRACT);
    for (i, farm) in farms.iter().enumerate() {
        println!(
            "{}. {}.addFarm({}, {{ contractAddress: {}, pid: {} }})",
            i + 3,
            ADAPTER_CONTRACT,
            farm.pool,
            farm.farm.contract_address,
            farm.farm.pid
        );
    }
    Ok(())
}
