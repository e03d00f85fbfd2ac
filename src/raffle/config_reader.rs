use crate::raffle::*;
use snafu::prelude::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// `csv` or `xlsx`. Deduced from the extension of the file if missing.
    pub provider: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpinSettings {
    #[serde(rename = "durationMs")]
    pub duration_ms: Option<u64>,
    #[serde(rename = "minTurns")]
    pub min_turns: Option<u32>,
    #[serde(rename = "extraTurns")]
    pub extra_turns: Option<u32>,
    #[serde(rename = "frameIntervalMs")]
    pub frame_interval_ms: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaffleConfig {
    #[serde(rename = "raffleName")]
    pub raffle_name: Option<String>,
    #[serde(rename = "participantSource")]
    pub participant_source: Option<ParticipantSource>,
    #[serde(rename = "participantCount")]
    pub participant_count: Option<usize>,
    #[serde(rename = "spinSettings")]
    pub spin_settings: Option<SpinSettings>,
    #[serde(rename = "randomSeed")]
    _random_seed: Option<JSValue>,
    #[serde(rename = "numberOfDraws")]
    pub number_of_draws: Option<usize>,
}

impl RaffleConfig {
    /// The seed may be written as a number or as a string.
    pub fn random_seed(&self) -> RaffleResult<Option<u64>> {
        match &self._random_seed {
            None | Some(JSValue::Null) => Ok(None),
            x => read_js_int(x).map(Some),
        }
    }
}

pub fn read_config(path: &str) -> RaffleResult<RaffleConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: RaffleConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> RaffleResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> RaffleResult<u64> {
    match x {
        Some(JSValue::Number(n)) => n.as_u64().context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<u64>()
            .ok()
            .context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
