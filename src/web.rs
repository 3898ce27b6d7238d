//! JavaScript bindings for the browser build.
//!
//! The renderer hands over rows (or lets us read them from the page), gets
//! the processed graph back as JSON and keeps a [`RecipeGraphHandle`] around
//! to answer metric and highlight queries during interaction.

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, Window};

use crate::components::recipe_graph::{GraphConfig, RecipeGraph, RecipeRow, Theme, parse_rows};
use crate::error::GraphError;

/// Id of the `<script type="application/json">` element holding the rows.
const DATA_ELEMENT_ID: &str = "recipe-data";

/// Module entry point: installs logging.
#[wasm_bindgen(start)]
pub fn start() {
	crate::init_logging();
}

/// Load recipe rows from a script element with id="recipe-data".
/// Expected format: JSON array of flat recipe rows.
pub fn load_recipe_rows() -> crate::Result<Vec<RecipeRow>> {
	let window: Window = web_sys::window().ok_or_else(|| GraphError::Dom("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| GraphError::Dom("no document".into()))?;
	let element = document
		.get_element_by_id(DATA_ELEMENT_ID)
		.ok_or_else(|| GraphError::MissingData(format!("#{DATA_ELEMENT_ID} element")))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| GraphError::Dom(format!("#{DATA_ELEMENT_ID} is not a script element")))?;
	let json_text = script
		.text()
		.map_err(|e| GraphError::Dom(format!("{e:?}")))?;

	let rows = parse_rows(&json_text)?;
	info!("recipe-graph: loaded {} rows from the page", rows.len());
	Ok(rows)
}

fn to_js(err: GraphError) -> JsValue {
	warn!("recipe-graph: {}", err);
	js_sys::Error::new(&err.to_string()).into()
}

fn config(config_json: Option<String>) -> Result<GraphConfig, JsValue> {
	match config_json {
		Some(json) => GraphConfig::from_json(&json).map_err(to_js),
		None => Ok(GraphConfig::default()),
	}
}

/// JSON of a named theme preset, `undefined` for unknown names. The result
/// can be passed back as the `theme` of a config.
#[wasm_bindgen(js_name = themePreset)]
pub fn theme_preset(name: &str) -> Result<Option<String>, JsValue> {
	Theme::by_name(name)
		.map(|theme| theme.to_json().map_err(to_js))
		.transpose()
}

/// A processed graph held on the Rust side for repeated queries.
#[wasm_bindgen]
pub struct RecipeGraphHandle {
	graph: RecipeGraph,
}

#[wasm_bindgen]
impl RecipeGraphHandle {
	/// Runs the pipeline over a JSON array of rows.
	#[wasm_bindgen(js_name = fromJson)]
	pub fn from_json(
		rows_json: &str,
		config_json: Option<String>,
	) -> Result<RecipeGraphHandle, JsValue> {
		let config = config(config_json)?;
		let graph = RecipeGraph::from_json(rows_json, &config).map_err(to_js)?;
		Ok(Self { graph })
	}

	/// Runs the pipeline over the rows embedded in the page.
	#[wasm_bindgen(js_name = fromDom)]
	pub fn from_dom(config_json: Option<String>) -> Result<RecipeGraphHandle, JsValue> {
		let config = config(config_json)?;
		let rows = load_recipe_rows().map_err(to_js)?;
		Ok(Self {
			graph: RecipeGraph::from_rows(&rows, &config),
		})
	}

	/// `{ nodes, links }` as JSON.
	#[wasm_bindgen(js_name = toJson)]
	pub fn to_json(&self) -> Result<String, JsValue> {
		self.graph.to_json().map_err(to_js)
	}

	/// Colors, radii, widths and opacity levels the graph was built with.
	#[wasm_bindgen(js_name = themeJson)]
	pub fn theme_json(&self) -> Result<String, JsValue> {
		self.graph.theme_json().map_err(to_js)
	}

	/// Visible connection count of a node.
	pub fn connections(&self, id: &str) -> usize {
		self.graph.connection_count(id)
	}

	/// Largest visible connection count in the graph.
	#[wasm_bindgen(js_name = maxConnections)]
	pub fn max_connections(&self) -> usize {
		self.graph.connections().max_connections
	}

	/// Depth of a node, 0 when unreachable.
	pub fn depth(&self, id: &str) -> usize {
		self.graph.depth(id)
	}

	/// Largest depth reached from the root materials.
	#[wasm_bindgen(js_name = maxDepth)]
	pub fn max_depth(&self) -> usize {
		self.graph.depths().max_depth
	}

	/// Opacity of a node under the given hover and selection.
	#[wasm_bindgen(js_name = nodeOpacity)]
	pub fn node_opacity(
		&self,
		id: &str,
		hovered: Option<String>,
		selected: Option<String>,
	) -> Option<f64> {
		let node = self.graph.data().node(id)?;
		let highlight = self.graph.highlight(hovered.as_deref(), selected.as_deref());
		Some(highlight.node_opacity(node, self.graph.theme()))
	}

	/// Opacity of the link at `index` in the serialized link list.
	#[wasm_bindgen(js_name = linkOpacity)]
	pub fn link_opacity(
		&self,
		index: usize,
		hovered: Option<String>,
		selected: Option<String>,
	) -> Option<f64> {
		let link = self.graph.data().links.get(index)?;
		let highlight = self.graph.highlight(hovered.as_deref(), selected.as_deref());
		Some(highlight.link_opacity(link, self.graph.theme()))
	}

	/// Stroke width of the link at `index`.
	#[wasm_bindgen(js_name = linkWidth)]
	pub fn link_width(
		&self,
		index: usize,
		hovered: Option<String>,
		selected: Option<String>,
	) -> Option<f64> {
		let link = self.graph.data().links.get(index)?;
		let highlight = self.graph.highlight(hovered.as_deref(), selected.as_deref());
		Some(highlight.link_width(link, self.graph.theme()))
	}

	/// Detail-panel data for a node as JSON, `undefined` for unknown ids.
	pub fn details(&self, id: &str) -> Result<Option<String>, JsValue> {
		self.graph
			.details(id)
			.map(|d| serde_json::to_string(&d).map_err(|e| to_js(e.into())))
			.transpose()
	}

	/// Id of the node that represents `id`, following it into clusters.
	pub fn locate(&self, id: &str) -> Option<String> {
		self.graph.locate(id).map(|n| n.id().to_string())
	}
}
