//! Visual theming for recipe graphs.
//!
//! The theme is an ordinary value handed to whatever needs it: the opacity
//! precomputer reads the link weights, the highlight queries read the
//! highlight levels. Colors, radii and strokes are carried for the renderer,
//! which receives the theme as JSON. Colors are CSS strings so renderers can
//! use custom properties (`var(--link-input-color)`) as well as literal colors.

use serde::{Deserialize, Serialize};

use super::opacity::LinkWeights;
use crate::error::Result;

/// Stroke widths for links in their different states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkWidths {
	/// Resting width of a visible link.
	pub normal: f64,
	/// Width of a link touching the hovered or selected node.
	pub highlighted: f64,
	/// Width reported for invisible links.
	pub default: f64,
}

impl Default for LinkWidths {
	fn default() -> Self {
		Self {
			normal: 1.0,
			highlighted: 1.0,
			default: 1.0,
		}
	}
}

/// Link visual style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkStyle {
	/// Stroke color of `input` links.
	pub input_color: String,
	/// Stroke color of `output` links.
	pub output_color: String,
	/// Opacity of a link between two unconnected nodes.
	pub opacity: f64,
	/// Opacity removed per connection of either endpoint.
	pub hub_falloff: f64,
	/// Lowest precomputed opacity of a visible link.
	pub min_opacity: f64,
	/// Stroke widths.
	pub width: LinkWidths,
}

impl Default for LinkStyle {
	fn default() -> Self {
		Self {
			input_color: "var(--link-input-color)".into(),
			output_color: "var(--link-output-color)".into(),
			opacity: 0.6,
			hub_falloff: 0.01,
			min_opacity: 0.1,
			width: LinkWidths::default(),
		}
	}
}

/// Opacity levels used while a node is hovered or selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightLevels {
	/// Highlighted nodes and links.
	pub full: f64,
	/// Nodes outside the highlighted neighborhood.
	pub dimmed: f64,
	/// Links outside the highlighted neighborhood.
	pub faded: f64,
}

impl Default for HighlightLevels {
	fn default() -> Self {
		Self {
			full: 1.0,
			dimmed: 0.3,
			faded: 0.1,
		}
	}
}

/// Style of a material or recipe node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
	/// Fill color.
	pub fill: String,
	/// Drawn radius.
	pub radius: f64,
	/// Collision radius used by force layouts.
	pub collision: f64,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			fill: "var(--node-material-fill)".into(),
			radius: 8.0,
			collision: 12.0,
		}
	}
}

/// Style of a cluster node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterStyle {
	/// Fill color of the cluster hull.
	pub fill: String,
	/// Drawn radius.
	pub radius: f64,
	/// Base opacity; highlight levels are multiplied by it.
	pub opacity: f64,
}

impl Default for ClusterStyle {
	fn default() -> Self {
		Self {
			fill: "rgba(0, 0, 0, 1.0)".into(),
			radius: 50.0,
			opacity: 0.1,
		}
	}
}

/// Node styles per kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyles {
	/// Material nodes.
	pub material: NodeStyle,
	/// Recipe nodes.
	pub recipe: NodeStyle,
	/// Cluster nodes.
	pub cluster: ClusterStyle,
	/// Outline color shared by every node.
	pub stroke: String,
	/// Outline width shared by every node.
	pub stroke_width: f64,
}

impl Default for NodeStyles {
	fn default() -> Self {
		Self {
			material: NodeStyle::default(),
			recipe: NodeStyle {
				fill: "var(--node-recipe-fill)".into(),
				radius: 12.0,
				collision: 18.0,
			},
			cluster: ClusterStyle::default(),
			stroke: "var(--node-stroke)".into(),
			stroke_width: 2.0,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
	/// Preset name, or whatever a config file calls its theme.
	pub name: String,
	/// Link styling and resting opacity weights.
	pub links: LinkStyle,
	/// Hover and selection opacity levels.
	pub highlight: HighlightLevels,
	/// Per-kind node styling.
	pub nodes: NodeStyles,
}

impl Theme {
	/// Balanced defaults for datasets of a few hundred recipes.
	pub fn default_theme() -> Self {
		Self {
			name: "default".into(),
			links: LinkStyle::default(),
			highlight: HighlightLevels::default(),
			nodes: NodeStyles::default(),
		}
	}

	/// Quieter links for very large datasets where hubs dominate.
	pub fn dense() -> Self {
		Self {
			name: "dense".into(),
			links: LinkStyle {
				opacity: 0.4,
				hub_falloff: 0.005,
				min_opacity: 0.1,
				..LinkStyle::default()
			},
			highlight: HighlightLevels {
				dimmed: 0.2,
				faded: 0.05,
				..HighlightLevels::default()
			},
			nodes: NodeStyles::default(),
		}
	}

	/// Looks up a preset by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"dense" => Some(Self::dense()),
			_ => None,
		}
	}

	/// Weights consumed by the link opacity precomputer.
	pub fn link_weights(&self) -> LinkWeights {
		LinkWeights {
			base_opacity: self.links.opacity,
			hub_falloff: self.links.hub_falloff,
			min_opacity: self.links.min_opacity,
		}
	}

	/// Serializes the theme for a renderer.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let theme: Theme = serde_json::from_str(r#"{"links": {"opacity": 0.8}}"#).unwrap();
		assert_eq!(theme.links.opacity, 0.8);
		assert_eq!(theme.links.min_opacity, 0.1);
		assert_eq!(theme.highlight, HighlightLevels::default());
		assert_eq!(theme.nodes.recipe.radius, 12.0);
	}

	#[test]
	fn presets_resolve_by_name() {
		assert_eq!(Theme::by_name("dense").map(|t| t.name), Some("dense".to_string()));
		assert!(Theme::by_name("neon").is_none());
		assert_eq!(Theme::default().link_weights().base_opacity, 0.6);
	}

	#[test]
	fn renderer_json_carries_node_styles() {
		let dense = Theme::by_name("dense").unwrap();
		let value: serde_json::Value = serde_json::from_str(&dense.to_json().unwrap()).unwrap();
		assert_eq!(value["name"], "dense");
		assert_eq!(value["links"]["inputColor"], "var(--link-input-color)");
		assert_eq!(value["nodes"]["recipe"]["radius"], 12.0);
		assert_eq!(value["nodes"]["strokeWidth"], 2.0);

		let back: Theme = serde_json::from_value(value).unwrap();
		assert_eq!(back, dense);
	}
}
