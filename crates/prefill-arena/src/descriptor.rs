//! Column descriptor: column name → `(ColumnType, Placement)`.
//!
//! The [`ColumnDescriptor`] is built from a [`FrameRequest`] before any row
//! storage exists. It fixes the column order, resolves categorical label
//! tables, and assigns every primitive column a slot in the column group for
//! its scalar type. The allocator then sizes storage from the descriptor,
//! and every later lookup by name starts here.

use indexmap::IndexMap;
use prefill_core::{parse_type_list, Categories, ColumnType, FrameError, ScalarType, TypeTag};
use smallvec::SmallVec;

use crate::config::FrameConfig;
use crate::request::{FrameRequest, TypeSpec};

/// Suffix of the view key that exposes a categorical column's label table.
pub const CATDEF_SUFFIX: &str = "-catdef";

/// The view key of a categorical column's label table.
pub fn catdef_key(column: &str) -> String {
    format!("{column}{CATDEF_SUFFIX}")
}

/// Where a column's storage lives inside a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// A run inside a shared column group.
    Group {
        /// Index of the group in the frame's group list.
        group: usize,
        /// Position of the column within the group.
        slot: usize,
    },
    /// A dedicated code array.
    Categorical {
        /// Index into the frame's code arrays.
        slot: usize,
    },
}

/// A single entry in the descriptor table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnEntry {
    /// Resolved column type.
    pub column_type: ColumnType,
    /// Storage location.
    pub placement: Placement,
    /// Timezone annotation; only ever set on datetime columns.
    pub timezone: Option<String>,
}

/// Layout of one column group before allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupLayout {
    /// Scalar type shared by every column in the group.
    pub dtype: ScalarType,
    /// Frame positions of the member columns, in slot order.
    pub members: SmallVec<[usize; 4]>,
}

impl GroupLayout {
    /// Number of columns in the group.
    pub fn width(&self) -> usize {
        self.members.len()
    }
}

/// Maps column names to their type and storage placement.
///
/// Uses `IndexMap` so iteration follows the requested column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    entries: IndexMap<String, ColumnEntry>,
    groups: Vec<GroupLayout>,
    categorical_count: usize,
}

impl ColumnDescriptor {
    /// Resolve a request into a descriptor.
    ///
    /// Parses the type list, pairs it with the column names, resolves
    /// categorical label tables (explicit labels, then a sized placeholder
    /// range, then `config.default_category_capacity`), and groups
    /// primitive columns by scalar type in first-seen order.
    pub fn from_request(request: &FrameRequest, config: &FrameConfig) -> Result<Self, FrameError> {
        let tags = match &request.types {
            TypeSpec::Codes(codes) => parse_type_list(codes, config.type_delimiter)?,
            TypeSpec::Tags(tags) => tags.clone(),
        };

        let names: Vec<String> = match &request.cols {
            Some(cols) => {
                if cols.len() != tags.len() {
                    return Err(FrameError::ColumnCountMismatch {
                        types: tags.len(),
                        columns: cols.len(),
                    });
                }
                cols.clone()
            }
            None => (0..tags.len()).map(|i| i.to_string()).collect(),
        };

        let mut entries = IndexMap::with_capacity(names.len());
        let mut groups: Vec<GroupLayout> = Vec::new();
        let mut group_of: IndexMap<ScalarType, usize> = IndexMap::new();
        let mut categorical_count = 0;

        for (position, (tag, name)) in tags.iter().zip(names).enumerate() {
            let (column_type, placement) = match tag {
                TypeTag::Scalar(dtype) => {
                    let group = *group_of.entry(*dtype).or_insert_with(|| {
                        groups.push(GroupLayout {
                            dtype: *dtype,
                            members: SmallVec::new(),
                        });
                        groups.len() - 1
                    });
                    let slot = groups[group].width();
                    groups[group].members.push(position);
                    (ColumnType::Primitive(*dtype), Placement::Group { group, slot })
                }
                TypeTag::Category => {
                    let spec = request.cats.as_ref().and_then(|cats| cats.get(&name));
                    let categories = Categories::resolve(spec, config.default_category_capacity);
                    let slot = categorical_count;
                    categorical_count += 1;
                    (ColumnType::Categorical(categories), Placement::Categorical { slot })
                }
            };

            let timezone = match &column_type {
                ColumnType::Primitive(dtype) if dtype.is_datetime() => {
                    request.timezones.get(&name).cloned()
                }
                _ => None,
            };

            if entries.contains_key(&name) {
                return Err(FrameError::DuplicateColumn { name });
            }
            entries.insert(
                name,
                ColumnEntry {
                    column_type,
                    placement,
                    timezone,
                },
            );
        }

        let descriptor = Self {
            entries,
            groups,
            categorical_count,
        };
        descriptor.check_view_keys(request)?;
        Ok(descriptor)
    }

    /// Every view key must be unique: a categorical column's `-catdef` key
    /// and a typed index's name must not shadow a column.
    fn check_view_keys(&self, request: &FrameRequest) -> Result<(), FrameError> {
        for (name, entry) in &self.entries {
            if entry.column_type.is_categorical() {
                let key = catdef_key(name);
                if self.entries.contains_key(&key) {
                    return Err(FrameError::DuplicateColumn { name: key });
                }
            }
        }
        if let (Some(_), Some(index_name)) = (&request.index_type, &request.index_name) {
            let shadows_catdef = self.entries.iter().any(|(name, entry)| {
                entry.column_type.is_categorical() && catdef_key(name) == *index_name
            });
            if self.entries.contains_key(index_name) || shadows_catdef {
                return Err(FrameError::DuplicateColumn {
                    name: index_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a column's entry.
    pub fn get(&self, name: &str) -> Option<&ColumnEntry> {
        self.entries.get(name)
    }

    /// Look up a column's entry along with its stored name.
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &ColumnEntry)> {
        self.entries
            .get_key_value(name)
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Iterate over all entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ColumnEntry)> {
        self.entries.iter()
    }

    /// Entries with mutable access, for installing label tables. Names and
    /// placements must not change.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut ColumnEntry)> {
        self.entries.iter_mut()
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<(&str, &mut ColumnEntry)> {
        self.entries
            .get_full_mut(name)
            .map(|(_, key, entry)| (key.as_str(), entry))
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column group layouts, in group order.
    pub fn groups(&self) -> &[GroupLayout] {
        &self.groups
    }

    /// Number of categorical columns.
    pub fn categorical_count(&self) -> usize {
        self.categorical_count
    }

    /// Iterate over categorical columns in slot order.
    pub fn categoricals(&self) -> impl Iterator<Item = (&str, &Categories)> {
        self.entries.iter().filter_map(|(name, entry)| {
            entry
                .column_type
                .categories()
                .map(|cats| (name.as_str(), cats))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefill_core::{CategorySpec, TimeUnit};

    fn resolve(request: &FrameRequest) -> Result<ColumnDescriptor, FrameError> {
        ColumnDescriptor::from_request(request, &FrameConfig::default())
    }

    #[test]
    fn same_type_columns_share_a_group() {
        let req = FrameRequest::new("i4,f4,i4,category,f4", 3).with_columns(["a", "b", "c", "d", "e"]);
        let desc = resolve(&req).unwrap();
        assert_eq!(desc.groups().len(), 2);
        assert_eq!(desc.groups()[0].dtype, ScalarType::Int32);
        assert_eq!(desc.groups()[0].members.as_slice(), &[0, 2]);
        assert_eq!(desc.groups()[1].members.as_slice(), &[1, 4]);
        assert_eq!(
            desc.get("c").unwrap().placement,
            Placement::Group { group: 0, slot: 1 }
        );
        assert_eq!(
            desc.get("d").unwrap().placement,
            Placement::Categorical { slot: 0 }
        );
        assert_eq!(desc.categorical_count(), 1);
    }

    #[test]
    fn order_follows_request() {
        let req = FrameRequest::new("f8,category,i1", 0).with_columns(["z", "y", "x"]);
        let desc = resolve(&req).unwrap();
        assert_eq!(desc.names().collect::<Vec<_>>(), ["z", "y", "x"]);
    }

    #[test]
    fn default_names_are_positions() {
        let desc = resolve(&FrameRequest::new("i2,i2", 1)).unwrap();
        assert_eq!(desc.names().collect::<Vec<_>>(), ["0", "1"]);
    }

    #[test]
    fn categories_resolve_in_priority_order() {
        let req = FrameRequest::new("category,category,category", 1)
            .with_categories("0", ["x", "y"])
            .with_categories("1", 5u32);
        let desc = resolve(&req).unwrap();
        let cats: Vec<_> = desc.categoricals().map(|(_, c)| c.clone()).collect();
        assert_eq!(cats[0], Categories::Labels(vec!["x".into(), "y".into()]));
        assert_eq!(cats[1], Categories::Range(5));
        assert_eq!(cats[2], Categories::Range(65_536));
    }

    #[test]
    fn cats_for_primitive_columns_are_ignored() {
        let req = FrameRequest::new("i4", 1).with_categories("0", CategorySpec::Count(3));
        let desc = resolve(&req).unwrap();
        assert_eq!(
            desc.get("0").unwrap().column_type,
            ColumnType::Primitive(ScalarType::Int32)
        );
    }

    #[test]
    fn timezone_only_sticks_to_datetimes() {
        let req = FrameRequest::new("M8[ns],i8", 1)
            .with_columns(["t", "n"])
            .with_timezone("t", "UTC")
            .with_timezone("n", "UTC");
        let desc = resolve(&req).unwrap();
        assert_eq!(desc.get("t").unwrap().timezone.as_deref(), Some("UTC"));
        assert_eq!(desc.get("n").unwrap().timezone, None);
        assert_eq!(
            desc.get("t").unwrap().column_type,
            ColumnType::Primitive(ScalarType::DateTime(TimeUnit::Nanosecond))
        );
    }

    #[test]
    fn datetime_units_form_separate_groups() {
        let desc = resolve(&FrameRequest::new("M8[ns],M8[us],i8", 1)).unwrap();
        assert_eq!(desc.groups().len(), 3);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let req = FrameRequest::new("i4,f4", 1).with_columns(["a"]);
        assert_eq!(
            resolve(&req),
            Err(FrameError::ColumnCountMismatch {
                types: 2,
                columns: 1
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let req = FrameRequest::new("i4,f4", 1).with_columns(["a", "a"]);
        assert_eq!(
            resolve(&req),
            Err(FrameError::DuplicateColumn { name: "a".into() })
        );
    }

    #[test]
    fn catdef_key_collision_is_rejected() {
        let req = FrameRequest::new("category,i4", 1).with_columns(["a", "a-catdef"]);
        assert_eq!(
            resolve(&req),
            Err(FrameError::DuplicateColumn {
                name: "a-catdef".into()
            })
        );
    }

    #[test]
    fn index_name_shadowing_a_column_is_rejected() {
        let req = FrameRequest::new("i4", 1)
            .with_columns(["a"])
            .with_index(ScalarType::Int64, "a");
        assert!(matches!(
            resolve(&req),
            Err(FrameError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn custom_category_capacity_is_used() {
        let config = FrameConfig {
            default_category_capacity: 300,
            ..FrameConfig::default()
        };
        let desc = ColumnDescriptor::from_request(&FrameRequest::new("category", 1), &config).unwrap();
        let (_, cats) = desc.categoricals().next().unwrap();
        assert_eq!(cats.len(), 300);
    }
}
