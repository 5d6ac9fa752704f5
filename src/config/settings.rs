use crate::core::currency::{CurrencyCode, ExchangeRateTable};
use crate::core::error::ValuationError;
use crate::valuation::demo::DemoScale;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exchange rate used until the user sets one: 3.60 NIS per USD.
pub const DEFAULT_EXCHANGE_RATE: Decimal = dec!(3.60);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// User settings, loaded once per session and passed explicitly to every
/// computation that needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub base_currency: CurrencyCode,
    pub quote_currency: CurrencyCode,
    /// Units of quote currency per 1 base unit.
    pub exchange_rate: Decimal,
    /// Further currencies, quoted the same way.
    pub extra_rates: BTreeMap<CurrencyCode, Decimal>,
    /// Last known employer equity price.
    pub equity_price: Option<Decimal>,
    /// Present only while demo mode is on.
    pub demo: Option<DemoScale>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: CurrencyCode::usd(),
            quote_currency: CurrencyCode::new("NIS"),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            extra_rates: BTreeMap::new(),
            equity_price: None,
            demo: None,
        }
    }
}

/// A requested change to [`Settings`]. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub exchange_rate: Option<Decimal>,
    pub equity_price: Option<Decimal>,
    pub extra_rates: BTreeMap<CurrencyCode, Decimal>,
}

impl Settings {
    /// Build the validated rate table these settings describe.
    pub fn rate_table(&self) -> Result<ExchangeRateTable, ValuationError> {
        let mut table = ExchangeRateTable::new(self.base_currency.clone());
        if self.quote_currency != self.base_currency {
            table.set_rate(self.quote_currency.clone(), self.exchange_rate)?;
        }
        for (currency, rate) in &self.extra_rates {
            table.set_rate(currency.clone(), *rate)?;
        }
        Ok(table)
    }

    /// Apply `update`, returning the new settings.
    ///
    /// Rejects the whole update if any rate is not positive.
    pub fn apply(&self, update: SettingsUpdate) -> Result<Settings, ValuationError> {
        let mut next = self.clone();
        if let Some(rate) = update.exchange_rate {
            next.exchange_rate = rate;
        }
        if let Some(price) = update.equity_price {
            if price < Decimal::ZERO {
                return Err(ValuationError::NegativeValue {
                    field: "equityPrice",
                    value: price,
                });
            }
            next.equity_price = Some(price);
        }
        next.extra_rates.extend(update.extra_rates);
        next.rate_table()?;
        Ok(next)
    }

    pub fn is_demo_mode(&self) -> bool {
        self.demo.is_some()
    }

    /// The scale to apply to outputs; identity when demo mode is off.
    pub fn demo_scale(&self) -> DemoScale {
        self.demo.unwrap_or_default()
    }

    /// Turn demo mode on, keeping the current factor if already on.
    pub fn enable_demo_mode<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DemoScale {
        if let Some(scale) = self.demo {
            return scale;
        }
        let scale = DemoScale::random(rng);
        log::info!("demo mode on ({}x)", scale.factor());
        self.demo = Some(scale);
        scale
    }

    /// Flip demo mode. Turning it on always draws a fresh factor.
    ///
    /// Returns whether demo mode is now on.
    pub fn toggle_demo_mode<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.demo.take().is_some() {
            log::info!("demo mode off");
            false
        } else {
            self.enable_demo_mode(rng);
            true
        }
    }
}

/// Settings persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults if the file does not exist.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&content)?;
        settings.rate_table()?;
        log::debug!("loaded settings from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        log::debug!("saved settings to {}", self.path.display());
        Ok(())
    }

    /// Load, apply `update`, save, and return the new settings.
    pub fn update(&self, update: SettingsUpdate) -> Result<Settings, SettingsError> {
        let next = self.load()?.apply(update)?;
        self.save(&next)?;
        Ok(next)
    }
}
