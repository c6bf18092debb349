mod types;

pub use types::Cli;

use wfor::conditions::{Condition, PathCondition, TcpCondition, UdpCondition};
use wfor::config::{ConfigError, Policy, RunConfig};

impl Cli {
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let policy = Policy::from_flags(self.and, self.or)?;
        RunConfig::new(self.interval, self.timeout, policy)
    }

    /// Conditions in polling order: path, http, tcp, udp
    pub fn conditions(&self) -> Result<Vec<Condition>, ConfigError> {
        if self.http_codes.is_some() && self.http.is_empty() {
            return Err(ConfigError::HttpCodesWithoutHttp);
        }
        let default_codes = self.http_codes.as_ref().map(|codes| codes.0.as_slice());

        let mut conditions: Vec<Condition> = self
            .path
            .iter()
            .map(|p| Condition::from(PathCondition::new(p)))
            .collect();

        for target in &self.http {
            conditions.push(Condition::from(target.clone().into_condition(default_codes)?));
        }

        conditions.extend(self.tcp.iter().map(|hp| Condition::from(TcpCondition::new(hp))));
        conditions.extend(self.udp.iter().map(|hp| Condition::from(UdpCondition::new(hp))));

        Ok(conditions)
    }
}
