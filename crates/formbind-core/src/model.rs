//! Model trait and property descriptor table.
//!
//! A [`ModelDescriptor`] is the statically declared list of a model type's
//! public properties: name, declared [`ValueKind`], getter and setter. It is
//! built once per type (normally by `#[derive(Model)]`) and shared by every
//! binder for that type, so the binder never depends on a particular
//! introspection mechanism.

use std::fmt;

use crate::error::{BindError, BindResult};
use crate::value::{FieldValue, Value, ValueKind};

/// The core trait for bindable model types.
///
/// In practice this is derived via `#[derive(Model)]`, but it can also be
/// implemented by hand.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use formbind_core::model::{Model, ModelDescriptor, PropertyDescriptor};
/// use formbind_core::value::Value;
///
/// #[derive(Default)]
/// struct Customer {
///     name: String,
///     active: bool,
/// }
///
/// impl Model for Customer {
///     fn descriptor() -> &'static ModelDescriptor<Self> {
///         static DESCRIPTOR: LazyLock<ModelDescriptor<Customer>> = LazyLock::new(|| {
///             ModelDescriptor::new(
///                 "Customer",
///                 vec![
///                     PropertyDescriptor::new("name", |m: &Customer| &m.name, |m| &mut m.name),
///                     PropertyDescriptor::new("active", |m: &Customer| &m.active, |m| &mut m.active),
///                 ],
///             )
///         });
///         &DESCRIPTOR
///     }
/// }
///
/// let c = Customer { name: "Ada".into(), active: true };
/// let name = Customer::descriptor().property("name").unwrap();
/// assert_eq!(name.get(&c), Value::from("Ada"));
/// ```
pub trait Model: Sized + 'static {
    /// Returns the static property table for this type.
    fn descriptor() -> &'static ModelDescriptor<Self>;
}

type Getter<M> = Box<dyn Fn(&M) -> Value + Send + Sync>;
type Setter<M> = Box<dyn Fn(&mut M, &Value) -> BindResult<()> + Send + Sync>;

/// One public, named, typed property of a model type.
pub struct PropertyDescriptor<M> {
    name: &'static str,
    kind: ValueKind,
    getter: Getter<M>,
    setter: Setter<M>,
    checker: fn(&Value) -> BindResult<()>,
    data_source: Option<Value>,
}

impl<M: 'static> PropertyDescriptor<M> {
    /// Creates a descriptor from a pair of field accessors.
    ///
    /// The declared kind comes from `T`'s [`FieldValue`] implementation.
    pub fn new<T>(name: &'static str, get: fn(&M) -> &T, set: fn(&mut M) -> &mut T) -> Self
    where
        T: FieldValue + 'static,
    {
        Self {
            name,
            kind: T::kind(),
            getter: Box::new(move |model| get(model).to_value()),
            setter: Box::new(move |model, value| {
                *set(model) = T::from_value(value)?;
                Ok(())
            }),
            checker: check_field::<T>,
            data_source: None,
        }
    }
}

impl<M> PropertyDescriptor<M> {
    /// Attaches a statically declared data source to this property.
    #[must_use]
    pub fn with_data_source(mut self, source: impl Into<Value>) -> Self {
        self.data_source = Some(source.into());
        self
    }

    /// The property name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared kind.
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The statically declared data source, if any.
    pub const fn data_source(&self) -> Option<&Value> {
        self.data_source.as_ref()
    }

    /// Reads the property from `model`.
    pub fn get(&self, model: &M) -> Value {
        (self.getter)(model)
    }

    /// Writes `value` into the property on `model`.
    ///
    /// The value must already have the declared kind (or be `Null`).
    pub fn set(&self, model: &mut M, value: &Value) -> BindResult<()> {
        (self.setter)(model, value)
    }

    /// Checks that `value` would be accepted by [`PropertyDescriptor::set`]
    /// without touching any model.
    pub fn check(&self, value: &Value) -> BindResult<()> {
        (self.checker)(value)
    }
}

impl<M> fmt::Debug for PropertyDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("data_source", &self.data_source)
            .finish_non_exhaustive()
    }
}

fn check_field<T: FieldValue>(value: &Value) -> BindResult<()> {
    T::from_value(value).map(drop)
}

/// The ordered property table of a model type.
#[derive(Debug)]
pub struct ModelDescriptor<M> {
    type_name: &'static str,
    properties: Vec<PropertyDescriptor<M>>,
}

impl<M> ModelDescriptor<M> {
    /// Creates a descriptor. Properties keep the given declaration order.
    pub fn new(type_name: &'static str, properties: Vec<PropertyDescriptor<M>>) -> Self {
        Self {
            type_name,
            properties,
        }
    }

    /// The model type's name.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All properties in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor<M>] {
        &self.properties
    }

    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor<M>> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the declaration index of the named property.
    pub fn index_of(&self, name: &str) -> BindResult<usize> {
        self.properties
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| BindError::UnknownProperty(format!("{}.{name}", self.type_name)))
    }

    /// Returns the property at a declaration index.
    pub fn get(&self, index: usize) -> Option<&PropertyDescriptor<M>> {
        self.properties.get(index)
    }

    /// The number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the model declares no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    #[derive(Default)]
    struct Order {
        code: String,
        quantity: i32,
        note: Option<String>,
    }

    impl Model for Order {
        fn descriptor() -> &'static ModelDescriptor<Self> {
            static DESCRIPTOR: LazyLock<ModelDescriptor<Order>> = LazyLock::new(|| {
                ModelDescriptor::new(
                    "Order",
                    vec![
                        PropertyDescriptor::new("code", |m: &Order| &m.code, |m| &mut m.code)
                            .with_data_source(Value::list(["A-1", "B-2"])),
                        PropertyDescriptor::new("quantity", |m: &Order| &m.quantity, |m| {
                            &mut m.quantity
                        }),
                        PropertyDescriptor::new("note", |m: &Order| &m.note, |m| &mut m.note),
                    ],
                )
            });
            &DESCRIPTOR
        }
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = Order::descriptor()
            .properties()
            .iter()
            .map(PropertyDescriptor::name)
            .collect();
        assert_eq!(names, vec!["code", "quantity", "note"]);
    }

    #[test]
    fn test_kinds() {
        let d = Order::descriptor();
        assert_eq!(d.property("quantity").unwrap().kind(), &ValueKind::Int);
        assert_eq!(
            d.property("note").unwrap().kind(),
            &ValueKind::Optional(Box::new(ValueKind::String))
        );
    }

    #[test]
    fn test_get_and_set() {
        let d = Order::descriptor();
        let mut order = Order::default();
        d.property("quantity")
            .unwrap()
            .set(&mut order, &Value::Int(3))
            .unwrap();
        assert_eq!(order.quantity, 3);
        assert_eq!(d.property("quantity").unwrap().get(&order), Value::Int(3));
    }

    #[test]
    fn test_check_does_not_write() {
        let d = Order::descriptor();
        let prop = d.property("quantity").unwrap();
        assert!(prop.check(&Value::Int(i64::MAX)).is_err());
        assert!(prop.check(&Value::Int(12)).is_ok());
    }

    #[test]
    fn test_index_of_unknown() {
        let err = Order::descriptor().index_of("missing").unwrap_err();
        assert!(matches!(err, BindError::UnknownProperty(ref p) if p == "Order.missing"));
    }

    #[test]
    fn test_static_data_source() {
        let d = Order::descriptor();
        assert_eq!(
            d.property("code").unwrap().data_source(),
            Some(&Value::list(["A-1", "B-2"]))
        );
        assert!(d.property("note").unwrap().data_source().is_none());
    }
}
