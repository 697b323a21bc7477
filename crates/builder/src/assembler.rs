//! Message assembler: composes complete requests from codec output.
//!
//! Body fields come from configuration; the operator supplies the routing
//! header and, depending on the instrument source, the symbol.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tradeprompt_config::{
    AppConfig, InstrumentConfig, InstrumentSource, MarketDataConfig, SecurityListConfig,
};
use tradeprompt_core::{
    Error, FieldWriter, MarketDataRequest, MdEntryTypeEntry, Prompt, ProtocolVersion,
    RelatedSymEntry, RequestMessage, Result, SecurityListRequest,
};
use uuid::Uuid;

use crate::codec;

/// Chooses the instrument placed in the NoRelatedSym group.
///
/// Whatever `select` returns is exactly what the group carries.
pub enum InstrumentSelector {
    Fixed(String),
    Random { candidates: Vec<String>, rng: StdRng },
    Prompt,
}

impl InstrumentSelector {
    pub fn from_config(config: &InstrumentConfig) -> Self {
        match config.source {
            InstrumentSource::Fixed => InstrumentSelector::Fixed(config.symbol.clone()),
            InstrumentSource::Random => {
                let rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                InstrumentSelector::Random {
                    candidates: config.candidates.clone(),
                    rng,
                }
            }
            InstrumentSource::Prompt => InstrumentSelector::Prompt,
        }
    }

    /// Random selection over `candidates` driven by the given generator.
    pub fn random(candidates: Vec<String>, rng: StdRng) -> Self {
        InstrumentSelector::Random { candidates, rng }
    }

    pub fn select<P: Prompt + ?Sized>(&mut self, prompt: &mut P) -> Result<String> {
        match self {
            InstrumentSelector::Fixed(symbol) => Ok(symbol.clone()),
            InstrumentSelector::Random { candidates, rng } => {
                if candidates.is_empty() {
                    return Err(Error::Config {
                        message: "no candidate instruments to choose from".into(),
                    });
                }
                let symbol = candidates[rng.random_range(0..candidates.len())].clone();
                tracing::info!(%symbol, "Fetching market data for randomly selected instrument");
                Ok(symbol)
            }
            InstrumentSelector::Prompt => {
                let field = codec::query_symbol(prompt)?;
                Ok(field.value.render())
            }
        }
    }
}

/// Builds one request per call. Holds only configuration and the
/// instrument selector; nothing from a previous build carries over.
pub struct RequestBuilder {
    market_data: MarketDataConfig,
    security_list: SecurityListConfig,
    unique_request_ids: bool,
    instruments: InstrumentSelector,
}

impl RequestBuilder {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            market_data: config.market_data.clone(),
            security_list: config.security_list.clone(),
            unique_request_ids: config.unique_request_ids,
            instruments: InstrumentSelector::from_config(&config.market_data.instrument),
        }
    }

    /// Replace the instrument selector (e.g. with a seeded generator).
    pub fn with_instruments(mut self, instruments: InstrumentSelector) -> Self {
        self.instruments = instruments;
        self
    }

    fn request_id(&self, base: &str) -> String {
        if self.unique_request_ids {
            format!("{base}-{}", Uuid::new_v4())
        } else {
            base.to_string()
        }
    }

    /// Prompt for SenderCompID, TargetCompID and, if the operator opts in,
    /// TargetSubID.
    pub fn build_header<P, W>(&self, prompt: &mut P, header: &mut W) -> Result<()>
    where
        P: Prompt + ?Sized,
        W: FieldWriter + ?Sized,
    {
        header.set(codec::query_sender_comp_id(prompt)?);
        header.set(codec::query_target_comp_id(prompt)?);
        if !prompt.read_confirmation("Use a TargetSubID")? {
            return Ok(());
        }
        header.set(codec::query_target_sub_id(prompt)?);
        Ok(())
    }

    pub fn build_market_data_request<P: Prompt + ?Sized>(
        &mut self,
        prompt: &mut P,
    ) -> Result<RequestMessage> {
        let mut request = MarketDataRequest::new(
            self.request_id(&self.market_data.md_req_id),
            self.market_data.subscription_request_type,
            self.market_data.market_depth,
        );
        for md_entry_type in &self.market_data.entry_types {
            request.entry_types.add(MdEntryTypeEntry {
                md_entry_type: *md_entry_type,
            });
        }

        let symbol = self.instruments.select(prompt)?;
        request.related_sym.add(RelatedSymEntry { symbol });

        self.build_header(prompt, &mut request)?;

        let message = RequestMessage::MarketData(request);
        message.validate()?;
        Ok(message)
    }

    /// Ask which protocol version to build for.
    pub fn query_version<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<ProtocolVersion> {
        prompt.show("")?;
        let index = prompt.read_choice("BeginString", &ProtocolVersion::labels())?;
        let version = ProtocolVersion::from_index(index).ok_or_else(|| Error::InvalidChoice {
            field: "BeginString".into(),
            input: index.to_string(),
        })?;
        prompt.show(&format!("Using {version}"))?;
        Ok(version)
    }

    pub fn build_security_list_request<P: Prompt + ?Sized>(
        &mut self,
        prompt: &mut P,
    ) -> Result<RequestMessage> {
        let version = self.query_version(prompt)?;
        if version != ProtocolVersion::Fix44 {
            return Err(Error::UnsupportedVersion(version.to_string()));
        }

        let mut request = SecurityListRequest::new(
            self.request_id(&self.security_list.security_req_id),
            self.security_list.request_type,
        );
        self.build_header(prompt, &mut request)?;

        let message = RequestMessage::SecurityList(request);
        message.validate()?;
        Ok(message)
    }
}
