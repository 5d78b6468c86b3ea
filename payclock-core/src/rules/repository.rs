use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use super::tables::{POSTAL_ALIASES, state_rules_2024};
use crate::error::CalculationError;
use crate::models::{BracketTable, JurisdictionKey, TaxRule};

/// Anything that can resolve a jurisdiction string to a tax rule.
///
/// [`TaxRuleRepository`] is the built-in implementation; the trait exists so
/// calculators can be pointed at alternative tables.
pub trait TaxRuleSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`CalculationError::UnsupportedJurisdiction`] when no
    /// canonical name or alias matches.
    fn resolve(
        &self,
        jurisdiction: &str,
    ) -> Result<&TaxRule, CalculationError>;
}

static BUILTIN: LazyLock<TaxRuleRepository> = LazyLock::new(|| {
    TaxRuleRepository::assemble(
        state_rules_2024(),
        POSTAL_ALIASES.iter().copied(),
    )
});

/// Read-only map from normalized jurisdiction names to tax rules.
///
/// Aliases map to a canonical name and are never stored as separate rules,
/// so an alias and its canonical name always share one [`TaxRule`].
#[derive(Debug, Clone)]
pub struct TaxRuleRepository {
    rules: HashMap<String, TaxRule>,
    aliases: HashMap<String, String>,
}

impl TaxRuleRepository {
    /// The 2024 single-filer state tables, built on first access.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a repository from caller-provided tables.
    ///
    /// Names and aliases are normalized before insertion.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] when a name appears
    /// twice, an alias shadows a canonical name, an alias points at an
    /// unknown name or at two different names, or a rule's rates are out of
    /// range.
    pub fn from_tables<'a>(
        rules: impl IntoIterator<Item = (&'a str, TaxRule)>,
        aliases: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CalculationError> {
        let mut repository = Self {
            rules: HashMap::new(),
            aliases: HashMap::new(),
        };

        for (name, rule) in rules {
            validate_rule(name, &rule)?;
            let key = JurisdictionKey::normalize(name);
            if repository.rules.insert(key.to_string(), rule).is_some() {
                return Err(CalculationError::invalid(format!(
                    "jurisdiction \"{key}\" defined twice"
                )));
            }
        }

        for (alias, target) in aliases {
            let alias = JurisdictionKey::normalize(alias);
            let target = JurisdictionKey::normalize(target);
            if repository.rules.contains_key(alias.as_str()) {
                return Err(CalculationError::invalid(format!(
                    "alias \"{alias}\" shadows a canonical jurisdiction"
                )));
            }
            if !repository.rules.contains_key(target.as_str()) {
                return Err(CalculationError::invalid(format!(
                    "alias \"{alias}\" points at unknown jurisdiction \"{target}\""
                )));
            }
            let previous = repository
                .aliases
                .insert(alias.to_string(), target.to_string());
            if let Some(previous) = previous.filter(|previous| previous != target.as_str()) {
                return Err(CalculationError::invalid(format!(
                    "alias \"{alias}\" defined twice, for \"{previous}\" and \"{target}\""
                )));
            }
        }

        Ok(repository)
    }

    fn assemble<'a>(
        rules: Vec<(&'a str, TaxRule)>,
        aliases: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(name, rule)| (name.to_string(), rule))
                .collect(),
            aliases: aliases
                .map(|(alias, target)| (alias.to_string(), target.to_string()))
                .collect(),
        }
    }

    /// Resolves a raw jurisdiction string to its canonical name.
    pub fn canonical_name(
        &self,
        jurisdiction: &str,
    ) -> Result<&str, CalculationError> {
        let key = JurisdictionKey::normalize(jurisdiction);

        if let Some((name, _)) = self.rules.get_key_value(key.as_str()) {
            return Ok(name.as_str());
        }

        self.aliases
            .get(key.as_str())
            .map(String::as_str)
            .ok_or_else(|| CalculationError::UnsupportedJurisdiction(jurisdiction.to_string()))
    }

    /// Looks up the rule for a canonical name or alias.
    pub fn lookup(
        &self,
        jurisdiction: &str,
    ) -> Result<&TaxRule, CalculationError> {
        let canonical = self.canonical_name(jurisdiction)?;
        let rule = self
            .rules
            .get(canonical)
            .ok_or_else(|| CalculationError::UnsupportedJurisdiction(jurisdiction.to_string()))?;

        debug!(jurisdiction, canonical, kind = rule.kind(), "resolved tax rule");
        Ok(rule)
    }

    /// Canonical jurisdiction names, sorted alphabetically.
    pub fn jurisdictions(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Alias/canonical pairs, sorted by alias.
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

impl TaxRuleSource for TaxRuleRepository {
    fn resolve(
        &self,
        jurisdiction: &str,
    ) -> Result<&TaxRule, CalculationError> {
        self.lookup(jurisdiction)
    }
}

fn validate_rule(
    name: &str,
    rule: &TaxRule,
) -> Result<(), CalculationError> {
    let checked = match rule {
        TaxRule::None => Ok(()),
        TaxRule::Flat { rate } => TaxRule::flat(*rate).map(|_| ()),
        TaxRule::Progressive { brackets } => {
            BracketTable::new(brackets.brackets().to_vec()).map(|_| ())
        }
    };

    checked.map_err(|e| match e {
        CalculationError::InvalidArgument(message) => {
            CalculationError::InvalidArgument(format!("{name}: {message}"))
        }
        other => other,
    })
}
