use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use shared::clock::TimestampZone;

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Config {
    pub timestamp_zone: TimestampZone,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["TIMESTAMP_ZONE"]))
            .extract()
    }
}
