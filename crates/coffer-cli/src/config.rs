// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Configuration file for the `coffer` binary.
//!
//! Every section and every key is optional; a missing file, section or key
//! falls back to the defaults below, which reproduce a 500.00 budget in a
//! two-digit currency with comma-delimited input and percentage returns.
//! Command-line flags take precedence over file values.

use coffer_dp::OptimizerConfig;
use coffer_model::{
    catalog::ReturnKind,
    decimal::InvalidAmount,
    loading::parse_amount,
    quantize::{Quantizer, RoundingPolicy},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetConfig,

    #[serde(default)]
    pub quantizer: QuantizerConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// The budget used when `--budget` is not given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BudgetConfig {
    /// Budget in major currency units, as a decimal string.
    #[serde(default = "default_amount")]
    pub amount: String,

    /// Symbol appended to amounts in reports.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_amount() -> String {
    "500.00".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    #[default]
    HalfAwayFromZero,
    HalfEven,
}

impl From<Rounding> for RoundingPolicy {
    fn from(r: Rounding) -> Self {
        match r {
            Rounding::HalfAwayFromZero => RoundingPolicy::HalfAwayFromZero,
            Rounding::HalfEven => RoundingPolicy::HalfEven,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QuantizerConfig {
    /// Fractional digits of the currency (2 for cents).
    #[serde(default = "default_minor_digits")]
    pub minor_digits: u32,

    #[serde(default)]
    pub rounding: Rounding,
}

fn default_minor_digits() -> u32 {
    2
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            minor_digits: default_minor_digits(),
            rounding: Rounding::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Returns {
    #[default]
    Percent,
    Absolute,
}

impl From<Returns> for ReturnKind {
    fn from(r: Returns) -> Self {
        match r {
            Returns::Percent => ReturnKind::Percent,
            Returns::Absolute => ReturnKind::Absolute,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// How the return column is read.
    #[serde(default)]
    pub returns: Returns,
}

fn default_delimiter() -> char {
    ','
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            returns: Returns::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_budget_units")]
    pub max_budget_units: usize,

    #[serde(default = "default_max_choice_bits")]
    pub max_choice_bits: usize,

    #[serde(default = "default_max_oracle_items")]
    pub max_oracle_items: usize,
}

fn default_max_budget_units() -> usize {
    OptimizerConfig::DEFAULT_MAX_BUDGET_UNITS
}

fn default_max_choice_bits() -> usize {
    OptimizerConfig::DEFAULT_MAX_CHOICE_BITS
}

fn default_max_oracle_items() -> usize {
    OptimizerConfig::DEFAULT_MAX_ORACLE_ITEMS
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_budget_units: default_max_budget_units(),
            max_choice_bits: default_max_choice_bits(),
            max_oracle_items: default_max_oracle_items(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// The quantizer described by the `[quantizer]` section.
    pub fn quantizer(&self) -> Result<Quantizer, ConfigError> {
        let digits = self.quantizer.minor_digits;
        if digits > 18 {
            return Err(ConfigError::MinorDigits(digits));
        }
        Ok(Quantizer::new(digits, self.quantizer.rounding.into()))
    }

    /// The optimizer limits described by the `[limits]` section.
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig::new()
            .with_max_budget_units(self.limits.max_budget_units)
            .with_max_choice_bits(self.limits.max_choice_bits)
            .with_max_oracle_items(self.limits.max_oracle_items)
    }
}

/// Parses a budget written the way amounts appear in input files
/// (`500`, `500,00`, `1 000 €`) and quantizes it.
pub fn parse_budget(text: &str, quantizer: &Quantizer) -> Result<u64, InvalidAmount> {
    let amount = parse_amount(text)?;
    quantizer.quantize(&amount)
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    MinorDigits(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileRead { path, source } => {
                write!(f, "Failed to read config file {:?}: {}", path, source)
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse config file {:?}: {}", path, source)
            }
            Self::MinorDigits(d) => write!(f, "minor_digits must be at most 18, got {}", d),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileRead { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::MinorDigits(_) => None,
        }
    }
}
