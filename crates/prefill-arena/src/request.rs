//! Description of the frame to allocate.

use indexmap::IndexMap;
use prefill_core::{CategorySpec, ScalarType, TypeTag};

/// Column types, either as a delimited code string or as parsed tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSpec {
    /// A delimited string such as `"i4,f4,category"`, split with the
    /// allocator's configured delimiter.
    Codes(String),
    /// Already-parsed tags.
    Tags(Vec<TypeTag>),
}

impl From<&str> for TypeSpec {
    fn from(codes: &str) -> Self {
        Self::Codes(codes.to_string())
    }
}

impl From<String> for TypeSpec {
    fn from(codes: String) -> Self {
        Self::Codes(codes)
    }
}

impl From<Vec<TypeTag>> for TypeSpec {
    fn from(tags: Vec<TypeTag>) -> Self {
        Self::Tags(tags)
    }
}

impl From<Vec<ScalarType>> for TypeSpec {
    fn from(scalars: Vec<ScalarType>) -> Self {
        Self::Tags(scalars.into_iter().map(TypeTag::Scalar).collect())
    }
}

/// Everything the allocator needs to lay out a frame.
///
/// Column names are strings; when `cols` is `None` the columns are named
/// `"0"`, `"1"`, ... in order, and `cats`/`timezones` are keyed the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    /// Per-column types, in column order.
    pub types: TypeSpec,
    /// Number of rows to allocate. Zero gives a schema-only frame.
    pub size: usize,
    /// Categorical metadata by column name. Only read for categorical columns.
    pub cats: Option<IndexMap<String, CategorySpec>>,
    /// Column names, paired 1:1 with `types`.
    pub cols: Option<Vec<String>>,
    /// Element type of an explicit index. `None` gives a range index.
    pub index_type: Option<ScalarType>,
    /// Name of the index; required when `index_type` is set.
    pub index_name: Option<String>,
    /// Timezone annotations for datetime columns, by column name.
    pub timezones: IndexMap<String, String>,
}

impl FrameRequest {
    /// A request with the given types and row count and nothing else.
    pub fn new(types: impl Into<TypeSpec>, size: usize) -> Self {
        Self {
            types: types.into(),
            size,
            cats: None,
            cols: None,
            index_type: None,
            index_name: None,
            timezones: IndexMap::new(),
        }
    }

    /// Name the columns.
    pub fn with_columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = Some(cols.into_iter().map(Into::into).collect());
        self
    }

    /// Attach categorical metadata for one column.
    pub fn with_categories(mut self, col: impl Into<String>, spec: impl Into<CategorySpec>) -> Self {
        self.cats
            .get_or_insert_with(IndexMap::new)
            .insert(col.into(), spec.into());
        self
    }

    /// Request an explicit index.
    pub fn with_index(mut self, index_type: ScalarType, index_name: impl Into<String>) -> Self {
        self.index_type = Some(index_type);
        self.index_name = Some(index_name.into());
        self
    }

    /// Annotate a datetime column with a timezone name.
    pub fn with_timezone(mut self, col: impl Into<String>, tz: impl Into<String>) -> Self {
        self.timezones.insert(col.into(), tz.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_fields() {
        let req = FrameRequest::new("i4,category", 10)
            .with_columns(["a", "b"])
            .with_categories("b", 5u32)
            .with_index(ScalarType::Int64, "id");
        assert_eq!(req.types, TypeSpec::Codes("i4,category".into()));
        assert_eq!(req.size, 10);
        assert_eq!(req.cols, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(req.cats.unwrap()["b"], CategorySpec::Count(5));
        assert_eq!(req.index_type, Some(ScalarType::Int64));
        assert_eq!(req.index_name.as_deref(), Some("id"));
    }

    #[test]
    fn scalar_list_converts_to_tags() {
        let spec = TypeSpec::from(vec![ScalarType::Bool]);
        assert_eq!(spec, TypeSpec::Tags(vec![TypeTag::Scalar(ScalarType::Bool)]));
    }
}
