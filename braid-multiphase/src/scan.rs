use braid_core::schema::{FieldSchema, RoleFilter};

/// Reports which fields of `obj` differ from the type's default instance.
///
/// Walks the type's statically declared field table, keeps the entries
/// matching `filter`, and compares each against a freshly constructed
/// default using the entry's own comparison semantics. Names are returned
/// in table order, so the output is deterministic. Pure inspection, no
/// side effects.
pub fn scan<T: FieldSchema + Default + 'static>(obj: &T, filter: RoleFilter) -> Vec<&'static str> {
    let default = T::default();
    T::field_table()
        .iter()
        .filter(|def| filter.matches(def.role))
        .filter(|def| (def.differs)(obj, &default))
        .map(|def| def.name)
        .collect()
}
