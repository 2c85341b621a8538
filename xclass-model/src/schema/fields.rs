//! Convenience constructors for common field shapes.
//!
//! Each `add_*` method is idempotent: when a field of that name already
//! exists it returns `false` and leaves the class untouched.

use super::Schema;
use crate::property::{
    BooleanType, DateType, DbListType, DbTreeListType, LevelsType, ListSettings, NumberKind,
    NumberType, PasswordType, PropertyKind, PropertyType, ReferenceListType, StaticListType,
    StringType, TextAreaType,
};

/// Display settings for [`Schema::add_static_list_field_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticListOptions {
    pub size: u32,
    pub multi_select: bool,
    pub display_type: String,
    /// Split characters; the first one is also the display separator.
    pub separators: String,
}

impl Default for StaticListOptions {
    fn default() -> Self {
        Self {
            size: 1,
            multi_select: false,
            display_type: "select".to_string(),
            separators: " ,|".to_string(),
        }
    }
}

impl Schema {
    fn add_new(&mut self, name: &str, pretty_name: &str, kind: PropertyKind) -> bool {
        if self.contains(name) {
            return false;
        }
        self.add_field(name, PropertyType::new(name, pretty_name, kind));
        true
    }

    pub fn add_text_field(&mut self, name: &str, pretty_name: &str, size: u32) -> bool {
        let kind = PropertyKind::String(StringType {
            size,
            ..StringType::default()
        });
        self.add_new(name, pretty_name, kind)
    }

    pub fn add_password_field(&mut self, name: &str, pretty_name: &str, size: u32) -> bool {
        let kind = PropertyKind::Password(PasswordType {
            size,
            ..PasswordType::default()
        });
        self.add_new(name, pretty_name, kind)
    }

    pub fn add_boolean_field(&mut self, name: &str, pretty_name: &str, display_type: &str) -> bool {
        let kind = PropertyKind::Boolean(BooleanType {
            display_type: display_type.to_string(),
            ..BooleanType::default()
        });
        self.add_new(name, pretty_name, kind)
    }

    /// Multi-select user field of size 5.
    pub fn add_users_field(&mut self, name: &str, pretty_name: &str) -> bool {
        self.add_users_field_with(name, pretty_name, 5, true)
    }

    pub fn add_users_field_with(
        &mut self,
        name: &str,
        pretty_name: &str,
        size: u32,
        multi_select: bool,
    ) -> bool {
        let mut list = ListSettings::default();
        list.size = size;
        list.multi_select = multi_select;
        let kind = PropertyKind::Users(ReferenceListType {
            list,
            uses_list: false,
        });
        self.add_new(name, pretty_name, kind)
    }

    /// Multi-select levels field of size 3.
    pub fn add_levels_field(&mut self, name: &str, pretty_name: &str) -> bool {
        self.add_levels_field_with(name, pretty_name, 3)
    }

    pub fn add_levels_field_with(&mut self, name: &str, pretty_name: &str, size: u32) -> bool {
        let kind = PropertyKind::Levels(LevelsType {
            list: ListSettings::default().multi(size),
        });
        self.add_new(name, pretty_name, kind)
    }

    /// Multi-select group field of size 5.
    pub fn add_groups_field(&mut self, name: &str, pretty_name: &str) -> bool {
        self.add_groups_field_with(name, pretty_name, 5)
    }

    pub fn add_groups_field_with(&mut self, name: &str, pretty_name: &str, size: u32) -> bool {
        let kind = PropertyKind::Groups(ReferenceListType {
            list: ListSettings::default().multi(size),
            uses_list: false,
        });
        self.add_new(name, pretty_name, kind)
    }

    /// 80x15 text area.
    pub fn add_template_field(&mut self, name: &str, pretty_name: &str) -> bool {
        self.add_text_area_field(name, pretty_name, 80, 15)
    }

    pub fn add_text_area_field(&mut self, name: &str, pretty_name: &str, cols: u32, rows: u32) -> bool {
        let kind = PropertyKind::TextArea(TextAreaType {
            size: cols,
            rows,
            ..TextAreaType::default()
        });
        self.add_new(name, pretty_name, kind)
    }

    /// Single-select static list.
    pub fn add_static_list_field(&mut self, name: &str, pretty_name: &str, values: &str) -> bool {
        self.add_static_list_field_with(name, pretty_name, values, &StaticListOptions::default())
    }

    pub fn add_static_list_field_with(
        &mut self,
        name: &str,
        pretty_name: &str,
        values: &str,
        options: &StaticListOptions,
    ) -> bool {
        let mut list = ListSettings::with_separators(options.separators.clone());
        list.size = options.size;
        list.multi_select = options.multi_select;
        list.display_type.clone_from(&options.display_type);
        if let Some(first) = options.separators.chars().next() {
            list.separator = first.to_string();
        }
        let kind = PropertyKind::StaticList(StaticListType {
            list,
            values: values.to_string(),
            ..StaticListType::default()
        });
        self.add_new(name, pretty_name, kind)
    }

    pub fn add_number_field(
        &mut self,
        name: &str,
        pretty_name: &str,
        size: u32,
        number_type: NumberKind,
    ) -> bool {
        self.add_new(name, pretty_name, PropertyKind::Number(NumberType::new(size, number_type)))
    }

    /// Date field with the default pattern; blank input means now.
    pub fn add_date_field(&mut self, name: &str, pretty_name: &str) -> bool {
        self.add_date_field_with(name, pretty_name, None, 1)
    }

    pub fn add_date_field_with(
        &mut self,
        name: &str,
        pretty_name: &str,
        date_format: Option<&str>,
        empty_is_today: u32,
    ) -> bool {
        let mut date = date_format.map_or_else(DateType::default, |f| DateType::with_format(f));
        date.empty_is_today = empty_is_today;
        self.add_new(name, pretty_name, PropertyKind::Date(date))
    }

    /// Single-select query-backed list.
    pub fn add_db_list_field(&mut self, name: &str, pretty_name: &str, sql: &str) -> bool {
        self.add_db_list_field_with(name, pretty_name, 1, false, sql)
    }

    /// Multi-select lists are stored relationally.
    pub fn add_db_list_field_with(
        &mut self,
        name: &str,
        pretty_name: &str,
        size: u32,
        multi_select: bool,
        sql: &str,
    ) -> bool {
        let kind = PropertyKind::DbList(db_list(size, multi_select, sql));
        self.add_new(name, pretty_name, kind)
    }

    pub fn add_db_tree_list_field(&mut self, name: &str, pretty_name: &str, sql: &str) -> bool {
        self.add_db_tree_list_field_with(name, pretty_name, 1, false, sql)
    }

    pub fn add_db_tree_list_field_with(
        &mut self,
        name: &str,
        pretty_name: &str,
        size: u32,
        multi_select: bool,
        sql: &str,
    ) -> bool {
        let kind = PropertyKind::DbTreeList(DbTreeListType {
            db: db_list(size, multi_select, sql),
            parent_field: String::new(),
        });
        self.add_new(name, pretty_name, kind)
    }
}

fn db_list(size: u32, multi_select: bool, sql: &str) -> DbListType {
    let mut list = ListSettings::default();
    list.size = size;
    list.multi_select = multi_select;
    list.relational_storage = multi_select;
    DbListType {
        list,
        sql: sql.to_string(),
        ..DbListType::default()
    }
}
