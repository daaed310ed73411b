use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines

use lion_lottery::{config::Config, services::SessionService};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml()?;

    // 打开存档并加载会话（含迁移）
    let session = SessionService::from_config(&config)?;
    let state = session.state();

    log::info!(
        "Session: balance {} coins, language {}, spin cost {}",
        state.balance,
        state.language,
        session.spin_cost()
    );

    for entry in session.probabilities() {
        log::info!(
            "[{}] {} {} stock {}/{} weight {} -> {:.2}%",
            entry.prize.tier.as_str(),
            entry.prize.image,
            entry.prize.name,
            entry.prize.stock,
            entry.prize.initial_stock,
            entry.prize.weight,
            entry.percent
        );
    }

    let pool = session.pool_summary();
    log::info!(
        "Pool: {} items, total value {}",
        pool.total_items,
        pool.total_value
    );

    let collection = session.collection_summary();
    log::info!(
        "Collection: {} items, total value {}",
        collection.total_items,
        collection.total_value
    );

    Ok(())
}
