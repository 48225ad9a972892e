//! Schema definitions and validation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{CountSource, CountUnit, FieldDef, FieldKind, ListElement, SchemaRef};
use crate::scalar::{Scalar, ScalarType};

/// An ordered field layout. Field order is wire order.
///
/// Construction validates the layout and resolves every count field to the
/// list it measures, so encoders never look fields up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schema {
    name: String,
    fields: Vec<FieldDef>,
    #[cfg_attr(feature = "serde", serde(skip))]
    count_of_list: Vec<Option<usize>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    list_of_count: Vec<Option<usize>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    fixed_size: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    min_size: usize,
}

impl Schema {
    /// Creates a schema from fields after validation.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> SchemaResult<Self> {
        let name = name.into();
        validate(&name, &fields)?;
        let (count_of_list, list_of_count) = resolve_counts(&fields);
        let fixed_size = fields
            .iter()
            .map(|field| field.kind.fixed_size())
            .sum::<Option<usize>>();
        let min_size = fields.iter().map(|field| field.kind.min_size()).sum();
        Ok(Self {
            name,
            fields,
            count_of_list,
            list_of_count,
            fixed_size,
            min_size,
        })
    }

    /// Creates a schema builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the field called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.index_of(name).map(|idx| &self.fields[idx])
    }

    /// For a counted list at `list_idx` whose count is a separate field,
    /// the index of that count field.
    #[must_use]
    pub fn count_field_of(&self, list_idx: usize) -> Option<usize> {
        self.count_of_list.get(list_idx).copied().flatten()
    }

    /// For a count field at `count_idx`, the index of the list it measures.
    #[must_use]
    pub fn list_of_count(&self, count_idx: usize) -> Option<usize> {
        self.list_of_count.get(count_idx).copied().flatten()
    }

    /// Encoded size if the layout has no variable-length or alignment fields.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        self.fixed_size
    }

    /// Encoded size with every list empty and no alignment padding.
    #[must_use]
    pub const fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns `true` if `fields` is a prefix of this schema.
    #[must_use]
    pub fn starts_with(&self, fields: &[FieldDef]) -> bool {
        self.fields.starts_with(fields)
    }
}

/// Builder for `Schema`.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    /// Adds a field definition.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, kind));
        self
    }

    /// Adds several field definitions in order.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use]
    pub fn scalar(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.field(name, FieldKind::Scalar(ty))
    }

    #[must_use]
    pub fn u8(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::U8)
    }

    #[must_use]
    pub fn u16(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::U16)
    }

    #[must_use]
    pub fn u32(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::U32)
    }

    #[must_use]
    pub fn u64(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::U64)
    }

    #[must_use]
    pub fn i8(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::I8)
    }

    #[must_use]
    pub fn i16(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::I16)
    }

    #[must_use]
    pub fn i32(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::I32)
    }

    #[must_use]
    pub fn i64(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::I64)
    }

    #[must_use]
    pub fn f32(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::F32)
    }

    #[must_use]
    pub fn f64(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarType::F64)
    }

    #[must_use]
    pub fn array(self, name: impl Into<String>, element: ScalarType, len: usize) -> Self {
        self.field(name, FieldKind::FixedArray { element, len })
    }

    #[must_use]
    pub fn composite(self, name: impl Into<String>, schema: &SchemaRef) -> Self {
        self.field(name, FieldKind::composite(schema))
    }

    /// Adds a list of `element` records counted by the field `count_field`.
    #[must_use]
    pub fn list(
        self,
        name: impl Into<String>,
        element: &SchemaRef,
        count_field: impl Into<String>,
    ) -> Self {
        self.field(name, FieldKind::list(element, count_field))
    }

    /// Adds a list of `element` records preceded by its own count.
    #[must_use]
    pub fn inline_list(
        self,
        name: impl Into<String>,
        element: &SchemaRef,
        width: ScalarType,
    ) -> Self {
        self.field(name, FieldKind::inline_list(element, width))
    }

    /// Adds a list of scalars counted by the field `count_field`.
    #[must_use]
    pub fn scalar_list(
        self,
        name: impl Into<String>,
        element: ScalarType,
        count_field: impl Into<String>,
    ) -> Self {
        self.field(
            name,
            FieldKind::CountedList {
                element: ListElement::Scalar(element),
                count: CountSource::Field(count_field.into()),
            },
        )
    }

    /// Adds the element count of `list`.
    #[must_use]
    pub fn count(
        self,
        name: impl Into<String>,
        width: ScalarType,
        list: impl Into<String>,
    ) -> Self {
        self.field(name, FieldKind::count(width, list))
    }

    /// Adds the length of `list` measured in bits.
    #[must_use]
    pub fn bit_count(
        self,
        name: impl Into<String>,
        width: ScalarType,
        list: impl Into<String>,
        bits_per_element: u32,
    ) -> Self {
        self.field(
            name,
            FieldKind::Count {
                width,
                list: list.into(),
                unit: CountUnit::Bits(bits_per_element),
            },
        )
    }

    /// Adds the total encoded length of the record.
    #[must_use]
    pub fn length(self, name: impl Into<String>, width: ScalarType) -> Self {
        self.field(name, FieldKind::Length(width))
    }

    #[must_use]
    pub fn padding_to(self, name: impl Into<String>, boundary: usize) -> Self {
        self.field(name, FieldKind::PaddingTo { boundary })
    }

    #[must_use]
    pub fn constant(self, name: impl Into<String>, value: Scalar) -> Self {
        self.field(name, FieldKind::Constant(value))
    }

    /// Builds the schema after validation.
    pub fn build(self) -> SchemaResult<Schema> {
        Schema::new(self.name, self.fields)
    }

    /// Builds the schema and wraps it for sharing.
    pub fn build_ref(self) -> SchemaResult<SchemaRef> {
        self.build().map(Arc::new)
    }
}

fn validate(name: &str, fields: &[FieldDef]) -> SchemaResult<()> {
    if name.is_empty() {
        return Err(SchemaError::EmptyName);
    }

    let mut names = HashSet::new();
    for field in fields {
        if field.name.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                schema: name.to_string(),
            });
        }
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                schema: name.to_string(),
                field: field.name.clone(),
            });
        }
        validate_field(field)?;
    }

    let length_fields = fields
        .iter()
        .filter(|field| matches!(field.kind, FieldKind::Length(_)))
        .count();
    if length_fields > 1 {
        return Err(SchemaError::MultipleLengthFields {
            schema: name.to_string(),
        });
    }

    validate_count_links(fields)
}

fn validate_field(field: &FieldDef) -> SchemaResult<()> {
    match &field.kind {
        FieldKind::FixedArray { len, .. } => {
            if *len == 0 {
                return Err(SchemaError::ZeroLengthArray {
                    field: field.name.clone(),
                });
            }
        }
        FieldKind::Count { width, unit, .. } => {
            check_unsigned(field, *width)?;
            if *unit == CountUnit::Bits(0) {
                return Err(SchemaError::InvalidCountUnit {
                    field: field.name.clone(),
                });
            }
        }
        FieldKind::CountedList {
            count: CountSource::Inline(width),
            ..
        }
        | FieldKind::Length(width) => {
            check_unsigned(field, *width)?;
        }
        FieldKind::PaddingTo { boundary } => {
            if !boundary.is_power_of_two() {
                return Err(SchemaError::InvalidBoundary {
                    field: field.name.clone(),
                    boundary: *boundary,
                });
            }
        }
        FieldKind::Scalar(_)
        | FieldKind::Composite(_)
        | FieldKind::CountedList { .. }
        | FieldKind::Constant(_) => {}
    }
    Ok(())
}

fn check_unsigned(field: &FieldDef, width: ScalarType) -> SchemaResult<()> {
    if width.is_unsigned_int() {
        Ok(())
    } else {
        Err(SchemaError::InvalidCountWidth {
            field: field.name.clone(),
            width,
        })
    }
}

fn validate_count_links(fields: &[FieldDef]) -> SchemaResult<()> {
    for (list_idx, field) in fields.iter().enumerate() {
        let FieldKind::CountedList {
            count: CountSource::Field(count_name),
            ..
        } = &field.kind
        else {
            continue;
        };
        let Some(count_idx) = fields.iter().position(|f| &f.name == count_name) else {
            return Err(SchemaError::UnknownCountField {
                list: field.name.clone(),
                count: count_name.clone(),
            });
        };
        match &fields[count_idx].kind {
            FieldKind::Count { list, .. } if *list == field.name => {}
            _ => {
                return Err(SchemaError::CountFieldMismatch {
                    list: field.name.clone(),
                    count: count_name.clone(),
                });
            }
        }
        if count_idx > list_idx {
            return Err(SchemaError::CountAfterList {
                list: field.name.clone(),
                count: count_name.clone(),
            });
        }
    }

    for field in fields {
        let FieldKind::Count { list, .. } = &field.kind else {
            continue;
        };
        let claimed = fields.iter().any(|f| {
            f.name == *list
                && match &f.kind {
                    FieldKind::CountedList {
                        count: CountSource::Field(source),
                        ..
                    } => *source == field.name,
                    _ => false,
                }
        });
        if !claimed {
            return Err(SchemaError::UnclaimedCountField {
                count: field.name.clone(),
                list: list.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_counts(fields: &[FieldDef]) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let mut count_of_list = vec![None; fields.len()];
    let mut list_of_count = vec![None; fields.len()];
    for (list_idx, field) in fields.iter().enumerate() {
        if let FieldKind::CountedList {
            count: CountSource::Field(count_name),
            ..
        } = &field.kind
        {
            if let Some(count_idx) = fields.iter().position(|f| &f.name == count_name) {
                count_of_list[list_idx] = Some(count_idx);
                list_of_count[count_idx] = Some(list_idx);
            }
        }
    }
    (count_of_list, list_of_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_id() -> SchemaRef {
        Schema::builder("EntityID")
            .u16("site")
            .u16("application")
            .u16("entity")
            .build_ref()
            .unwrap()
    }

    #[test]
    fn schema_builder_roundtrip() {
        let schema = Schema::builder("Pair")
            .u8("a")
            .f32("b")
            .build()
            .unwrap();
        assert_eq!(schema.name(), "Pair");
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fixed_size(), Some(5));
        assert_eq!(schema.index_of("b"), Some(1));
        assert!(schema.field("c").is_none());
    }

    #[test]
    fn schema_rejects_empty_name() {
        let err = Schema::builder("").u8("a").build().unwrap_err();
        assert_eq!(err, SchemaError::EmptyName);
    }

    #[test]
    fn schema_rejects_duplicate_fields() {
        let err = Schema::builder("Dup").u8("a").u16("a").build().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn schema_rejects_zero_length_array() {
        let err = Schema::builder("Arr")
            .array("marking", ScalarType::U8, 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ZeroLengthArray { .. }));
    }

    #[test]
    fn schema_rejects_signed_count() {
        let err = Schema::builder("Bad")
            .count("n", ScalarType::I16, "items")
            .list("items", &entity_id(), "n")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidCountWidth {
                width: ScalarType::I16,
                ..
            }
        ));
    }

    #[test]
    fn schema_rejects_non_power_of_two_boundary() {
        let err = Schema::builder("Pad")
            .padding_to("pad", 3)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidBoundary { boundary: 3, .. }));
    }

    #[test]
    fn schema_rejects_unknown_count_field() {
        let err = Schema::builder("Lists")
            .list("items", &entity_id(), "missing")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownCountField { .. }));
    }

    #[test]
    fn schema_rejects_count_after_list() {
        let err = Schema::builder("Lists")
            .list("items", &entity_id(), "n")
            .count("n", ScalarType::U8, "items")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::CountAfterList { .. }));
    }

    #[test]
    fn schema_rejects_count_naming_another_list() {
        let err = Schema::builder("Lists")
            .count("n", ScalarType::U8, "other")
            .list("items", &entity_id(), "n")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::CountFieldMismatch { .. }));
    }

    #[test]
    fn schema_rejects_unclaimed_count() {
        let err = Schema::builder("Lists")
            .count("n", ScalarType::U8, "items")
            .u8("items")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnclaimedCountField { .. }));
    }

    #[test]
    fn schema_rejects_two_length_fields() {
        let err = Schema::builder("Len")
            .length("a", ScalarType::U16)
            .length("b", ScalarType::U16)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::MultipleLengthFields { .. }));
    }

    #[test]
    fn count_links_are_resolved() {
        let schema = Schema::builder("Detached")
            .count("number_of_items", ScalarType::U8, "items")
            .u16("pad")
            .list("items", &entity_id(), "number_of_items")
            .build()
            .unwrap();
        assert_eq!(schema.count_field_of(2), Some(0));
        assert_eq!(schema.list_of_count(0), Some(2));
        assert_eq!(schema.count_field_of(1), None);
        assert_eq!(schema.fixed_size(), None);
        assert_eq!(schema.min_size(), 3);
    }

    #[test]
    fn nested_fixed_size() {
        let outer = Schema::builder("Outer")
            .composite("a", &entity_id())
            .composite("b", &entity_id())
            .f64("c")
            .build()
            .unwrap();
        assert_eq!(outer.fixed_size(), Some(20));
        assert_eq!(outer.min_size(), 20);
    }

    #[test]
    fn starts_with_prefix() {
        let prefix = vec![
            FieldDef::new("a", FieldKind::Scalar(ScalarType::U8)),
            FieldDef::new("b", FieldKind::Scalar(ScalarType::U8)),
        ];
        let schema = Schema::builder("P")
            .fields(prefix.clone())
            .u32("c")
            .build()
            .unwrap();
        assert!(schema.starts_with(&prefix));
        assert!(!schema.starts_with(&prefix[1..]));
    }
}
