//! Shopping-list aggregation over free-text ingredient lists.
//!
//! Each meal's `ingredients` text is split into lines on `,`, `;` or newline.
//! Every non-empty line is parsed into a quantity, an optional unit and an
//! item, and lines sharing the same `unit item` key are summed:
//!
//! ```text
//! "2 eggs, 1/2 cup flour"  +  "3 eggs; salt"
//!   => cup flour 0.5, eggs 5, salt 1
//! ```
//!
//! Parsing never fails. Anything that does not look like `<number> [unit] item`
//! is counted once under its full text. Units are not converted, and a unit
//! glued to its number (`300g`) is not split off.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Meal, ShoppingListEntry};

/// `<quantity>[ws [unit ws] item]`. The quantity must be whitespace separated
/// from what follows, so `300g chicken` does not match.
static QUANTITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\d./]+)(?:\s+(?:([a-z]+)\s+)?(.*))?$").expect("ingredient pattern is valid")
});

/// Anything carrying a free-text ingredient list.
pub trait HasIngredients {
    fn ingredient_text(&self) -> &str;
}

impl HasIngredients for Meal {
    fn ingredient_text(&self) -> &str {
        &self.ingredients
    }
}

impl HasIngredients for str {
    fn ingredient_text(&self) -> &str {
        self
    }
}

impl HasIngredients for String {
    fn ingredient_text(&self) -> &str {
        self
    }
}

impl<T: HasIngredients + ?Sized> HasIngredients for &T {
    fn ingredient_text(&self) -> &str {
        (**self).ingredient_text()
    }
}

/// One ingredient line after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    pub quantity: f64,
    /// Lowercase alphabetic unit, empty when none was found.
    pub unit: String,
    pub item: String,
}

impl ParsedIngredient {
    /// Parse one raw line. Returns `None` only for blank lines.
    pub fn parse(raw: &str) -> Option<Self> {
        let line = raw.trim().to_lowercase();
        if line.is_empty() {
            return None;
        }

        let parsed = QUANTITY_LINE.captures(&line).and_then(|caps| {
            let quantity = parse_quantity(&caps[1])?;
            Some(Self {
                quantity,
                unit: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                item: caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
            })
        });

        // Malformed quantities keep the whole line as the item.
        Some(parsed.unwrap_or_else(|| Self::whole_line(line)))
    }

    /// The deduplication key: `unit item`, or just `item` without a unit.
    pub fn key(&self) -> String {
        format!("{} {}", self.unit, self.item).trim().to_string()
    }

    fn whole_line(line: String) -> Self {
        Self {
            quantity: 1.0,
            unit: String::new(),
            item: line,
        }
    }
}

/// Decimal or `a/b` fraction. `None` on anything unparsable, a zero
/// denominator, or a value outside the finite `f64` range.
fn parse_quantity(token: &str) -> Option<f64> {
    let quantity = match token.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            (den != 0.0).then(|| num / den)?
        }
        None => token.parse().ok()?,
    };
    quantity.is_finite().then_some(quantity)
}

/// Split an ingredient field into raw lines on `,`, `;` and `\n`.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', ';', '\n'])
}

/// Build a shopping list from every meal's ingredient text.
///
/// Entries are unique by key and sorted ascending. Meals with empty
/// ingredient text contribute nothing.
pub fn aggregate<I>(meals: I) -> Vec<ShoppingListEntry>
where
    I: IntoIterator,
    I::Item: HasIngredients,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for meal in meals {
        for parsed in split_lines(meal.ingredient_text()).filter_map(ParsedIngredient::parse) {
            *totals.entry(parsed.key()).or_insert(0.0) += parsed.quantity;
        }
    }

    totals
        .into_iter()
        .map(|(ingredient, count)| ShoppingListEntry { ingredient, count })
        .collect()
}
