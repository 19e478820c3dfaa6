use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::factory;
use crate::supervisor::Supervisor;

/// The running engine: every plugin constructed and opened, `num_workers`
/// workers started and sharing them.
pub struct Engine {
    supervisor: Supervisor,
}

impl Engine {
    /// Build every plugin named in `config`, open inputs and outputs, and
    /// start the supervisor. Any failure here is a startup-time error --
    /// nothing has been spawned yet when it's returned.
    pub async fn bootstrap(config: EngineConfig) -> Result<Self, EngineError> {
        let cache = factory::build_cache(&config.cache)?;
        let alerts = factory::build_alert_registry(&config.alerts)?;

        let mut inputs = Vec::with_capacity(config.inputs.len());
        for cfg in &config.inputs {
            let input_ctx = format!("input '{}'", cfg.name);
            let input = factory::build_input(cfg).map_err(|e| e.with_context(&input_ctx))?;
            input
                .open()
                .await
                .map_err(|e| EngineError::from(e).with_context(&input_ctx))?;
            tracing::info!(input = %cfg.name, plugin = %cfg.plugin_type, "opened input");
            inputs.push(input);
        }

        let mut filters = Vec::with_capacity(config.filters.len());
        for cfg in &config.filters {
            let filter_ctx = format!("filter '{}'", cfg.name);
            filters.push(
                factory::build_filter(cfg, config.filter_timeout(), cache.clone(), alerts.clone())
                    .map_err(|e| e.with_context(&filter_ctx))?,
            );
        }

        let mut outputs = Vec::with_capacity(config.outputs.len());
        for cfg in &config.outputs {
            let output_ctx = format!("output '{}'", cfg.name);
            let output = factory::build_output(cfg).map_err(|e| e.with_context(&output_ctx))?;
            output
                .open()
                .await
                .map_err(|e| EngineError::from(e).with_context(&output_ctx))?;
            tracing::info!(output = %cfg.name, plugin = %cfg.plugin_type, "opened output");
            outputs.push(output);
        }

        let num_workers = config.resolved_num_workers();
        let supervisor = Supervisor::start(
            num_workers,
            inputs,
            filters,
            outputs,
            config.resolved_backlog(),
        );

        tracing::info!(num_workers, "engine bootstrapped");

        Ok(Self { supervisor })
    }

    /// Stop every worker, returning the first `Close()` error seen across
    /// any plugin.
    pub async fn shutdown(self) -> Result<(), EngineError> {
        self.supervisor.stop().await
    }
}
