//! Stage document writer
//!
//! Owns the output buffer for one export pass: header/footer, the optional
//! fog block, per-type node elements, and the shared value elements (layers,
//! bounding boxes, custom properties). The writer is responsible for
//! attribute escaping, per-element numeric precision, and structural
//! well-formedness; nodes nest by opening an element, emitting children, and
//! closing it again, tracked on an element stack.
//!
//! Output is accumulated in memory and only handed to the sink once the pass
//! completes, so a failed or cancelled export never produces a truncated
//! document.

use std::borrow::Cow;

use crate::export::light_params::{clamp_color, LightParams};
use crate::foundation::math::{Transform, Vec3};
use crate::scene::camera::CameraSpec;
use crate::scene::layers::LayerMask;
use crate::scene::light::LightSpec;
use crate::scene::properties::{is_internal, PropertyValue};
use crate::scene::world::WorldSettings;

/// Format version declared in the document header
const FORMAT_VERSION: &str = "1.0";

/// Decimal places for the camera field-of-view attribute
const CAMERA_SCALAR_PRECISION: usize = 3;
/// Decimal places for camera position and orientation
const CAMERA_VECTOR_PRECISION: usize = 2;
/// Decimal places for all light scalars and vectors
const LIGHT_PRECISION: usize = 4;
/// Decimal places for fog depth and color
const FOG_PRECISION: usize = 3;
/// Decimal places for stage-element transforms and bounding boxes
const ELEMENT_PRECISION: usize = 6;

/// Buffered writer for one Stage document
#[derive(Debug, Default)]
pub struct StageWriter {
    buf: String,
    open_elements: Vec<&'static str>,
}

impl StageWriter {
    /// Create an empty writer for one export pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the format declaration and head block, then open the scene
    pub fn write_header(&mut self, file_name: &str, generator: &str) {
        self.raw("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        self.raw(&format!("<stage version=\"{FORMAT_VERSION}\">"));
        self.raw("<head>");
        self.raw(&format!(
            "<meta name=\"filename\" content=\"{}\" />",
            escape_attr(file_name)
        ));
        self.raw(&format!(
            "<meta name=\"generator\" content=\"{}\" />",
            escape_attr(generator)
        ));
        self.raw("</head><scene>");
    }

    /// Close the scene and the document
    pub fn write_footer(&mut self) {
        debug_assert!(
            self.open_elements.is_empty(),
            "unclosed node elements at footer"
        );
        self.raw("</scene></stage>");
    }

    /// Consume the writer and return the finished document text
    pub fn finish(self) -> String {
        self.buf
    }

    /// Emit the fog block when the world has mist enabled
    pub fn write_fog(&mut self, world: &WorldSettings) {
        let Some(fog) = world.fog else {
            return;
        };

        self.raw(&format!("<fog type=\"{}\"", fog.falloff.type_marker()));
        self.attr_scalar("depth", fog.depth, FOG_PRECISION);
        self.raw(">");
        self.vec3_element("color", clamp_color(world.horizon_color), FOG_PRECISION);
        self.raw("</fog>");
    }

    /// Open a camera element; children nest until [`StageWriter::close_node`]
    pub fn open_camera(
        &mut self,
        id: &str,
        spec: &CameraSpec,
        transform: &Transform,
        layers: LayerMask,
        properties: &[(String, PropertyValue)],
    ) {
        self.raw(&format!("<camera id=\"{}\"", escape_attr(id)));
        self.attr_scalar("fov", spec.fov, CAMERA_SCALAR_PRECISION);
        self.raw(">");

        self.vec3_element("position", transform.position, CAMERA_VECTOR_PRECISION);
        self.quat_element("orientation", transform, CAMERA_VECTOR_PRECISION);

        self.write_layers(layers);
        self.write_properties(properties);

        self.open_elements.push("camera");
    }

    /// Open a light element; children nest until [`StageWriter::close_node`]
    pub fn open_light(
        &mut self,
        id: &str,
        spec: &LightSpec,
        params: &LightParams,
        direction: Option<Vec3>,
        location: Option<Vec3>,
        layers: LayerMask,
        properties: &[(String, PropertyValue)],
    ) {
        self.raw(&format!(
            "<light type=\"{}\" id=\"{}\"",
            spec.kind_name(),
            escape_attr(id)
        ));
        if let Some(spot) = params.spot {
            // Spot lights lead with the derived radius
            if let Some(radius) = params.radius {
                self.attr_scalar("radius", radius, LIGHT_PRECISION);
            }
            self.attr_scalar("ambientintensity", params.ambient_intensity, LIGHT_PRECISION);
            self.attr_scalar("intensity", params.intensity, LIGHT_PRECISION);
            self.attr_scalar("spotsize", spot.spot_size, LIGHT_PRECISION);
            self.attr_scalar("angle", spot.angle, LIGHT_PRECISION);
        } else {
            self.attr_scalar("ambientintensity", params.ambient_intensity, LIGHT_PRECISION);
            self.attr_scalar("intensity", params.intensity, LIGHT_PRECISION);
            if let Some(radius) = params.radius {
                self.attr_scalar("radius", radius, LIGHT_PRECISION);
            }
        }
        self.raw(">");

        self.vec3_element("color", clamp_color(spec.color), LIGHT_PRECISION);
        if let Some(direction) = direction {
            self.vec3_element("direction", direction, LIGHT_PRECISION);
        }
        if let Some(location) = location {
            self.vec3_element("location", location, LIGHT_PRECISION);
        }

        self.write_layers(layers);
        self.write_properties(properties);

        self.open_elements.push("light");
    }

    /// Open a stage element for a prefab instance; children nest until
    /// [`StageWriter::close_node`]
    pub fn open_element(
        &mut self,
        id: &str,
        link: &str,
        transform: &Transform,
        bounding_box: &[Vec3; 8],
        layers: LayerMask,
        properties: &[(String, PropertyValue)],
    ) {
        self.raw(&format!(
            "<element id=\"{}\" link=\"{}\">",
            escape_attr(id),
            escape_attr(link)
        ));

        self.vec3_element("translation", transform.position, ELEMENT_PRECISION);
        self.quat_element("rotation", transform, ELEMENT_PRECISION);
        self.vec3_element("scale", transform.scale, ELEMENT_PRECISION);

        self.write_bounding_box(bounding_box);
        self.write_layers(layers);
        self.write_properties(properties);

        self.open_elements.push("element");
    }

    /// Close the innermost open node element
    pub fn close_node(&mut self) {
        if let Some(name) = self.open_elements.pop() {
            self.raw(&format!("</{name}>"));
        } else {
            debug_assert!(false, "close_node without a matching open");
        }
    }

    // ------------------------------------------------------------------
    // Shared value elements
    // ------------------------------------------------------------------

    /// Emit the layer bitset as twenty 0/1 tokens
    fn write_layers(&mut self, layers: LayerMask) {
        self.raw("<layers>");
        let tokens: Vec<&str> = layers
            .slots()
            .map(|set| if set { "1" } else { "0" })
            .collect();
        self.raw(&tokens.join(" "));
        self.raw("</layers>");
    }

    /// Emit the eight bounding-box corner points
    fn write_bounding_box(&mut self, corners: &[Vec3; 8]) {
        self.raw("<boundingBox>");
        for corner in corners {
            self.raw("<point>");
            self.raw(&format_vec3(*corner, ELEMENT_PRECISION));
            self.raw("</point>");
        }
        self.raw("</boundingBox>");
    }

    /// Emit the custom property block, skipping host-internal keys
    fn write_properties(&mut self, properties: &[(String, PropertyValue)]) {
        self.raw("<customproperties>");
        for (name, value) in properties {
            if is_internal(name) {
                continue;
            }
            if name.is_empty() {
                log::warn!("skipping custom property with empty name");
                continue;
            }
            self.raw(&format!(
                "<property id=\"{}\" type=\"{}\" Value=\"{}\" />",
                escape_attr(name),
                value.type_tag(),
                escape_attr(&value.value_text())
            ));
        }
        self.raw("</customproperties>");
    }

    // ------------------------------------------------------------------
    // Low-level emission
    // ------------------------------------------------------------------

    fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn attr_scalar(&mut self, name: &str, value: f32, precision: usize) {
        self.raw(&format!(" {name}=\"{value:.precision$}\""));
    }

    fn vec3_element(&mut self, tag: &str, value: Vec3, precision: usize) {
        self.raw(&format!("<{tag}>{}</{tag}>", format_vec3(value, precision)));
    }

    /// Emit a rotation as quaternion text in `x y z w` order
    fn quat_element(&mut self, tag: &str, transform: &Transform, precision: usize) {
        let q = transform.rotation.as_ref().coords;
        self.raw(&format!(
            "<{tag}>{:.p$} {:.p$} {:.p$} {:.p$}</{tag}>",
            q.x,
            q.y,
            q.z,
            q.w,
            p = precision
        ));
    }
}

/// Render a vector as whitespace-separated fixed-precision text
fn format_vec3(value: Vec3, precision: usize) -> String {
    format!(
        "{:.p$} {:.p$} {:.p$}",
        value.x,
        value.y,
        value.z,
        p = precision
    )
}

/// Escape text for use inside a double-quoted attribute value
fn escape_attr(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
