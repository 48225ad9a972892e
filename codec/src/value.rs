//! Record instances and field values.

use std::sync::Arc;

use schema::{CountUnit, FieldDef, FieldKind, ListElement, Scalar, ScalarType, SchemaRef};

use crate::error::{StructuralError, StructuralResult};
use crate::size::marshalled_size;

/// The value held by one field of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Scalar(Scalar),
    /// Elements of a fixed array or of a list of scalars.
    Array(Vec<Scalar>),
    Record(Record),
    List(Vec<Record>),
    /// Placeholder for fields the encoder computes.
    Derived,
    /// Held by a bit count field whose list ends in a partly used element:
    /// the number of trailing bits of that element left out of the count.
    UnusedBits(u32),
}

impl Value {
    /// Default value for a field of `kind`.
    #[must_use]
    pub fn default_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Scalar(ty) => Self::Scalar(Scalar::zero(*ty)),
            FieldKind::FixedArray { element, len } => {
                Self::Array(vec![Scalar::zero(*element); *len])
            }
            FieldKind::Composite(schema) => Self::Record(Record::new(schema)),
            FieldKind::CountedList {
                element: ListElement::Record(_),
                ..
            } => Self::List(Vec::new()),
            FieldKind::CountedList {
                element: ListElement::Scalar(_),
                ..
            } => Self::Array(Vec::new()),
            FieldKind::Count { .. }
            | FieldKind::Length(_)
            | FieldKind::PaddingTo { .. }
            | FieldKind::Constant(_) => Self::Derived,
        }
    }

    /// Number of elements when used as a list.
    pub(crate) fn list_len(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::List(items) => items.len(),
            _ => 0,
        }
    }

    /// Trailing bits a bit count leaves out of the final element.
    pub(crate) const fn unused_bits(&self) -> u32 {
        match self {
            Self::UnusedBits(bits) => *bits,
            _ => 0,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Scalar(value) => format!("scalar {}", value.ty()),
            Self::Array(items) => format!("array of {}", items.len()),
            Self::Record(record) => format!("record {}", record.name()),
            Self::List(items) => format!("list of {}", items.len()),
            Self::Derived => "derived value".to_string(),
            Self::UnusedBits(bits) => format!("{bits} unused bits"),
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(value: Vec<Scalar>) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<Record>> for Value {
    fn from(value: Vec<Record>) -> Self {
        Self::List(value)
    }
}

/// One instance of a schema: a value per field, in schema order.
///
/// Records own their values outright. The schema is shared. Setters check
/// each value against its field, so a record built through this API always
/// encodes unless a list outgrows its count field.
#[derive(Debug, Clone)]
pub struct Record {
    schema: SchemaRef,
    values: Vec<Value>,
}

impl Record {
    /// Creates a record with every field at its default: zero scalars,
    /// zero-filled arrays, default sub-records and empty lists.
    #[must_use]
    pub fn new(schema: &SchemaRef) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| Value::default_for(&field.kind))
            .collect();
        Self {
            schema: Arc::clone(schema),
            values,
        }
    }

    pub(crate) fn from_parts(schema: SchemaRef, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Name of the record's schema.
    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The stored value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|idx| &self.values[idx])
    }

    /// Reads a scalar-valued field.
    ///
    /// Derived fields read their live value: a count field reports the
    /// current length of its list, a length field the record's current
    /// encoded size, and a constant field its constant. Returns `None` for
    /// unknown fields, non-scalar fields, padding, and derived values that
    /// do not fit their width.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<Scalar> {
        let idx = self.schema.index_of(name)?;
        match &self.schema.fields()[idx].kind {
            FieldKind::Scalar(_) => match &self.values[idx] {
                Value::Scalar(value) => Some(*value),
                _ => None,
            },
            FieldKind::Count { width, unit, .. } => {
                let list = self.schema.list_of_count(idx)?;
                let unused = self.values[idx].unused_bits();
                let count = count_value(*unit, self.values[list].list_len(), unused)?;
                Scalar::from_unsigned(*width, count)
            }
            FieldKind::Length(width) => {
                Scalar::from_unsigned(*width, marshalled_size(self) as u64)
            }
            FieldKind::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Replaces the value of a field after checking its shape.
    ///
    /// Setting a derived field (count, length, padding or constant) has no
    /// effect: those are computed when encoding.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> StructuralResult<()> {
        let idx = self.index(name)?;
        let field = &self.schema.fields()[idx];
        if field.kind.is_derived() {
            log::debug!(
                "ignoring write to derived field {}.{}",
                self.schema.name(),
                field.name
            );
            return Ok(());
        }
        let value = value.into();
        check_value(field, &value)?;
        self.values[idx] = value;
        Ok(())
    }

    /// Sets a scalar field.
    pub fn set_scalar(&mut self, name: &str, value: impl Into<Scalar>) -> StructuralResult<()> {
        self.set(name, Value::Scalar(value.into()))
    }

    /// Marks the final element of a bit-counted list as partly used.
    ///
    /// `count` names a bit count field. The count written becomes the full
    /// bit length of the list minus `unused`, which must be smaller than one
    /// element. Decoding sets this from the received count.
    pub fn set_unused_bits(&mut self, count: &str, unused: u32) -> StructuralResult<()> {
        let idx = self.index(count)?;
        let field = &self.schema.fields()[idx];
        let value = Value::UnusedBits(unused);
        match field.kind {
            FieldKind::Count {
                unit: CountUnit::Bits(bits),
                ..
            } if unused < bits => {
                self.values[idx] = if unused == 0 { Value::Derived } else { value };
                Ok(())
            }
            _ => Err(kind_mismatch(field, &value)),
        }
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> StructuralResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// An embedded sub-record.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Record> {
        match self.get(name)? {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn record_mut(&mut self, name: &str) -> Option<&mut Record> {
        let idx = self.schema.index_of(name)?;
        match &mut self.values[idx] {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Elements of a fixed array or a list of scalars.
    #[must_use]
    pub fn array(&self, name: &str) -> Option<&[Scalar]> {
        match self.get(name)? {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Elements of a list of records.
    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[Record]> {
        match self.get(name)? {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable access to list elements. The list length is fixed here; use
    /// [`Record::push`] or [`Record::set`] to change it.
    pub fn list_mut(&mut self, name: &str) -> Option<&mut [Record]> {
        let idx = self.schema.index_of(name)?;
        match &mut self.values[idx] {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Appends a record to a list field.
    pub fn push(&mut self, name: &str, element: Record) -> StructuralResult<()> {
        let idx = self.index(name)?;
        let field = &self.schema.fields()[idx];
        let FieldKind::CountedList {
            element: ListElement::Record(expected),
            ..
        } = &field.kind
        else {
            return Err(kind_mismatch(field, &Value::Record(element)));
        };
        check_schema(&field.name, expected, element.schema())?;
        if let Value::List(items) = &mut self.values[idx] {
            items.push(element);
        }
        Ok(())
    }

    /// Appends a scalar to a list of scalars.
    pub fn push_scalar(&mut self, name: &str, value: impl Into<Scalar>) -> StructuralResult<()> {
        let idx = self.index(name)?;
        let field = &self.schema.fields()[idx];
        let value = value.into();
        let FieldKind::CountedList {
            element: ListElement::Scalar(ty),
            ..
        } = &field.kind
        else {
            return Err(kind_mismatch(field, &Value::Scalar(value)));
        };
        check_scalar(&field.name, *ty, value)?;
        if let Value::Array(items) = &mut self.values[idx] {
            items.push(value);
        }
        Ok(())
    }

    fn index(&self, name: &str) -> StructuralResult<usize> {
        self.schema
            .index_of(name)
            .ok_or_else(|| StructuralError::UnknownField {
                schema: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }
}

/// Count written for a list of `len` elements whose final element leaves
/// `unused` bits out.
pub(crate) fn count_value(unit: CountUnit, len: usize, unused: u32) -> Option<u64> {
    let len = u64::try_from(len).ok()?;
    match unit {
        CountUnit::Elements => Some(len),
        CountUnit::Bits(_) if len == 0 => Some(0),
        CountUnit::Bits(bits) => len
            .checked_mul(u64::from(bits))?
            .checked_sub(u64::from(unused)),
    }
}

/// Returns `true` if records of `found` may stand where `expected` is declared.
pub(crate) fn same_schema(expected: &SchemaRef, found: &SchemaRef) -> bool {
    Arc::ptr_eq(expected, found) || **expected == **found
}

pub(crate) fn check_schema(
    field: &str,
    expected: &SchemaRef,
    found: &SchemaRef,
) -> StructuralResult<()> {
    if same_schema(expected, found) {
        Ok(())
    } else {
        Err(StructuralError::WrongElementSchema {
            field: field.to_string(),
            expected: expected.name().to_string(),
            found: found.name().to_string(),
        })
    }
}

pub(crate) fn check_scalar(field: &str, ty: ScalarType, value: Scalar) -> StructuralResult<()> {
    if value.ty() == ty {
        Ok(())
    } else {
        Err(StructuralError::ValueKindMismatch {
            field: field.to_string(),
            expected: format!("scalar {ty}"),
            found: format!("scalar {}", value.ty()),
        })
    }
}

pub(crate) fn kind_mismatch(field: &FieldDef, found: &Value) -> StructuralError {
    let expected = match &field.kind {
        FieldKind::Scalar(ty) => format!("scalar {ty}"),
        FieldKind::FixedArray { element, len } => format!("array of {len} {element}"),
        FieldKind::Composite(schema) => format!("record {}", schema.name()),
        FieldKind::CountedList {
            element: ListElement::Record(schema),
            ..
        } => format!("list of {}", schema.name()),
        FieldKind::CountedList {
            element: ListElement::Scalar(ty),
            ..
        } => format!("list of {ty}"),
        _ => "derived value".to_string(),
    };
    StructuralError::ValueKindMismatch {
        field: field.name.clone(),
        expected,
        found: found.describe(),
    }
}

/// Checks that `value` has the shape `field` declares.
pub(crate) fn check_value(field: &FieldDef, value: &Value) -> StructuralResult<()> {
    match (&field.kind, value) {
        (FieldKind::Scalar(ty), Value::Scalar(value)) => check_scalar(&field.name, *ty, *value),
        (FieldKind::FixedArray { element, len }, Value::Array(items)) => {
            if items.len() != *len {
                return Err(StructuralError::ArrayLengthMismatch {
                    field: field.name.clone(),
                    expected: *len,
                    actual: items.len(),
                });
            }
            items
                .iter()
                .try_for_each(|item| check_scalar(&field.name, *element, *item))
        }
        (FieldKind::Composite(schema), Value::Record(record)) => {
            check_schema(&field.name, schema, record.schema())
        }
        (
            FieldKind::CountedList {
                element: ListElement::Record(schema),
                ..
            },
            Value::List(items),
        ) => items
            .iter()
            .try_for_each(|item| check_schema(&field.name, schema, item.schema())),
        (
            FieldKind::CountedList {
                element: ListElement::Scalar(ty),
                ..
            },
            Value::Array(items),
        ) => items
            .iter()
            .try_for_each(|item| check_scalar(&field.name, *ty, *item)),
        (kind, Value::Derived) if kind.is_derived() => Ok(()),
        (
            FieldKind::Count {
                unit: CountUnit::Bits(bits),
                ..
            },
            Value::UnusedBits(unused),
        ) if unused < bits => Ok(()),
        _ => Err(kind_mismatch(field, value)),
    }
}
