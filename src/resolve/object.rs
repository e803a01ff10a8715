// ABOUTME: Object graph resolver driven by declared renderable properties
// ABOUTME: Renders string properties in place and recurses into nested resolvable values

use tracing::{debug, warn};

use super::error::PropertyError;
use crate::template::{TemplateContext, TemplateEngine, OPEN_MARKER};

/// A type whose string and nested properties can be resolved in place.
///
/// Implementations list the properties that take part in resolution, in the
/// order they should be visited. Primitive fields are simply not listed.
///
/// ```
/// use resolvent::{Property, Resolvable};
///
/// struct Address {
///     street: String,
///     city: Option<String>,
///     zip: u32,
/// }
///
/// impl Resolvable for Address {
///     fn properties(&mut self) -> Vec<Property<'_>> {
///         vec![
///             Property::text("street", &mut self.street),
///             Property::optional_text("city", &mut self.city),
///         ]
///     }
/// }
/// ```
pub trait Resolvable {
    fn properties(&mut self) -> Vec<Property<'_>>;
}

type Setter<'a> = Box<dyn FnOnce(String) -> Result<(), PropertyError> + 'a>;

/// One renderable property of a [`Resolvable`] value
pub struct Property<'a> {
    name: &'static str,
    slot: Slot<'a>,
}

enum Slot<'a> {
    Text(Option<&'a mut String>),
    Nested(Option<&'a mut dyn Resolvable>),
    Accessor {
        current: Result<Option<String>, PropertyError>,
        setter: Setter<'a>,
    },
}

impl<'a> Property<'a> {
    pub fn text(name: &'static str, value: &'a mut String) -> Self {
        Self {
            name,
            slot: Slot::Text(Some(value)),
        }
    }

    /// A string property that may be unset; `None` is skipped
    pub fn optional_text(name: &'static str, value: &'a mut Option<String>) -> Self {
        Self {
            name,
            slot: Slot::Text(value.as_mut()),
        }
    }

    pub fn nested<T: Resolvable + 'a>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            name,
            slot: Slot::Nested(Some(value as &mut dyn Resolvable)),
        }
    }

    /// A nested property that may be unset; `None` is skipped
    pub fn optional_nested<T: Resolvable + 'a>(name: &'static str, value: Option<&'a mut T>) -> Self {
        Self {
            name,
            slot: Slot::Nested(value.map(|v| v as &mut dyn Resolvable)),
        }
    }

    /// A computed string property read through a getter result and written
    /// back through a fallible setter. Either side may fail; the failure is
    /// logged and the property skipped.
    pub fn accessor<S>(
        name: &'static str,
        current: Result<Option<String>, PropertyError>,
        setter: S,
    ) -> Self
    where
        S: FnOnce(String) -> Result<(), PropertyError> + 'a,
    {
        Self {
            name,
            slot: Slot::Accessor {
                current,
                setter: Box::new(setter),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A property left unresolved because of an error
#[derive(Debug)]
pub struct SkippedProperty {
    pub path: String,
    pub error: PropertyError,
}

/// Outcome of one object resolution pass
#[derive(Debug, Default)]
pub struct ResolveReport {
    /// Dotted paths of the properties that were rendered
    pub rendered: Vec<String>,
    pub skipped: Vec<SkippedProperty>,
}

impl ResolveReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Resolve every declared property of `thing` in place and hand it back.
/// Failures on individual properties are logged and do not stop siblings.
pub fn resolve_object<'t, T: Resolvable + ?Sized>(
    engine: &TemplateEngine,
    thing: &'t mut T,
    context: &TemplateContext,
) -> &'t mut T {
    let report = resolve_object_reporting(engine, thing, context);
    debug!(
        "resolved {} properties, skipped {}",
        report.rendered.len(),
        report.skipped.len()
    );
    thing
}

/// Same as [`resolve_object`], returning what happened to each property
pub fn resolve_object_reporting<T: Resolvable + ?Sized>(
    engine: &TemplateEngine,
    thing: &mut T,
    context: &TemplateContext,
) -> ResolveReport {
    let mut report = ResolveReport::default();
    walk(engine, thing.properties(), context, "", &mut report);
    report
}

fn walk(
    engine: &TemplateEngine,
    properties: Vec<Property<'_>>,
    context: &TemplateContext,
    prefix: &str,
    report: &mut ResolveReport,
) {
    for property in properties {
        let path = if prefix.is_empty() {
            property.name.to_string()
        } else {
            format!("{}.{}", prefix, property.name)
        };

        match resolve_property(engine, property.slot, context, &path, report) {
            Ok(true) => report.rendered.push(path),
            Ok(false) => {}
            Err(error) => {
                warn!("resolve_object: skipping '{}': {}", path, error);
                report.skipped.push(SkippedProperty { path, error });
            }
        }
    }
}

/// Returns whether a string was rendered at this property
fn resolve_property(
    engine: &TemplateEngine,
    slot: Slot<'_>,
    context: &TemplateContext,
    path: &str,
    report: &mut ResolveReport,
) -> Result<bool, PropertyError> {
    match slot {
        Slot::Text(None) | Slot::Nested(None) => Ok(false),
        Slot::Text(Some(value)) => {
            if !value.contains(OPEN_MARKER) {
                return Ok(false);
            }
            *value = engine.render(value, context)?;
            Ok(true)
        }
        Slot::Nested(Some(nested)) => {
            walk(engine, nested.properties(), context, path, report);
            Ok(false)
        }
        Slot::Accessor { current, setter } => match current? {
            Some(value) if value.contains(OPEN_MARKER) => {
                let rendered = engine.render(&value, context)?;
                setter(rendered)?;
                Ok(true)
            }
            _ => Ok(false),
        },
    }
}
