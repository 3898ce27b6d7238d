//! Flat recipe rows as exported by the wiki extract script.
//!
//! Each row is a JSON object with `RecipeId`, `Building`, `Time` and six
//! numbered input and output slots (`Input1Name`, `Input1Qty`, `Input1Icon`,
//! ...). The exporter writes every value as a string, hand-written fixtures
//! often use numbers, so both are accepted.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Number of input and output slots per recipe row.
pub const MAX_SLOTS: usize = 6;

/// One numbered item slot of a recipe row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemSlot {
	/// Item name, which doubles as the material node id.
	pub name: String,
	/// Parsed quantity, 0 when the column is empty or not a number.
	pub qty: i64,
	/// Icon reference, when the exporter had one.
	pub icon: Option<String>,
}

impl ItemSlot {
	/// Slots with an empty name or a non-positive quantity are ignored.
	pub fn is_valid(&self) -> bool {
		!self.name.is_empty() && self.qty > 0
	}
}

/// A single recipe as delivered by the data-fetch step.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawRow")]
pub struct RecipeRow {
	/// Raw `RecipeId`; empty ids mark rows to skip.
	pub recipe_id: String,
	/// Building name, empty when absent.
	pub building: String,
	/// Craft time as exported.
	pub time: String,
	/// Input slots in column order, at most [`MAX_SLOTS`].
	pub inputs: Vec<ItemSlot>,
	/// Output slots in column order, at most [`MAX_SLOTS`].
	pub outputs: Vec<ItemSlot>,
}

impl RecipeRow {
	/// An empty row with the given recipe id.
	pub fn new(recipe_id: impl Into<String>) -> Self {
		Self {
			recipe_id: recipe_id.into(),
			..Self::default()
		}
	}

	/// Sets the building.
	pub fn building(mut self, building: impl Into<String>) -> Self {
		self.building = building.into();
		self
	}

	/// Sets the craft time.
	pub fn time(mut self, time: impl Into<String>) -> Self {
		self.time = time.into();
		self
	}

	/// Appends an input slot. Slots past the sixth are dropped.
	pub fn input(mut self, name: impl Into<String>, qty: i64) -> Self {
		if self.inputs.len() < MAX_SLOTS {
			self.inputs.push(ItemSlot {
				name: name.into(),
				qty,
				icon: None,
			});
		}
		self
	}

	/// Appends an output slot. Slots past the sixth are dropped.
	pub fn output(mut self, name: impl Into<String>, qty: i64) -> Self {
		if self.outputs.len() < MAX_SLOTS {
			self.outputs.push(ItemSlot {
				name: name.into(),
				qty,
				icon: None,
			});
		}
		self
	}

	/// Rows without a recipe id contribute nothing to the graph.
	pub fn is_valid(&self) -> bool {
		!self.recipe_id.is_empty()
	}

	/// Input slots that produce nodes and links.
	pub fn valid_inputs(&self) -> impl Iterator<Item = &ItemSlot> {
		self.inputs.iter().take(MAX_SLOTS).filter(|s| s.is_valid())
	}

	/// Output slots that produce nodes and links.
	pub fn valid_outputs(&self) -> impl Iterator<Item = &ItemSlot> {
		self.outputs.iter().take(MAX_SLOTS).filter(|s| s.is_valid())
	}
}

/// Untyped row object, keyed by column name.
#[derive(Deserialize)]
#[serde(transparent)]
struct RawRow(HashMap<String, Value>);

impl RawRow {
	fn text(&self, key: &str) -> String {
		match self.0.get(key) {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Null) | None => String::new(),
			Some(other) => other.to_string(),
		}
	}

	fn slot(&self, side: &str, i: usize) -> ItemSlot {
		let icon = self.text(&format!("{side}{i}Icon"));
		ItemSlot {
			name: self.text(&format!("{side}{i}Name")),
			qty: self.0.get(&format!("{side}{i}Qty")).map(parse_quantity).unwrap_or(0),
			icon: (!icon.is_empty()).then_some(icon),
		}
	}
}

impl From<RawRow> for RecipeRow {
	fn from(raw: RawRow) -> Self {
		Self {
			recipe_id: raw.text("RecipeId"),
			building: raw.text("Building"),
			time: raw.text("Time"),
			inputs: (1..=MAX_SLOTS).map(|i| raw.slot("Input", i)).collect(),
			outputs: (1..=MAX_SLOTS).map(|i| raw.slot("Output", i)).collect(),
		}
	}
}

/// Reads a quantity cell the way the exporter's consumers always have:
/// the leading integer of a string, numbers truncated, anything else 0.
pub fn parse_quantity(value: &Value) -> i64 {
	match value {
		Value::Number(n) => n
			.as_i64()
			.or_else(|| n.as_f64().map(|f| f.trunc() as i64))
			.unwrap_or(0),
		Value::String(s) => leading_integer(s),
		_ => 0,
	}
}

fn leading_integer(s: &str) -> i64 {
	let s = s.trim_start();
	let (sign, digits) = match s.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, s.strip_prefix('+').unwrap_or(s)),
	};
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());
	digits[..end]
		.parse::<i64>()
		.map(|n| sign * n)
		.unwrap_or(0)
}

/// Decodes a JSON array of rows. `null` is treated as an empty dataset.
pub fn parse_rows(json: &str) -> Result<Vec<RecipeRow>> {
	let rows: Option<Vec<RecipeRow>> = serde_json::from_str(json)?;
	Ok(rows.unwrap_or_default())
}
