//! In-memory credential tree.
//!
//! Groups live in an arena owned by [`Database`]. A [`GroupId`] is a
//! non-owning handle, so the parent back-reference never forms an ownership
//! cycle. Only the database hands out ids; ids from one database must not be
//! used with another.

use crate::models::entry::Entry;
use crate::models::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    parent: Option<GroupId>,
    groups: Vec<GroupId>,
    entries: Vec<Entry>,
}

impl Group {
    fn new(name: &str, parent: Option<GroupId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            groups: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// The open credential tree plus its unsaved-changes flag.
#[derive(Debug, Clone)]
pub struct Database {
    groups: Vec<Group>,
    dirty: bool,
}

impl Database {
    pub fn new(root_name: &str) -> Self {
        Self {
            groups: vec![Group::new(root_name, None)],
            dirty: false,
        }
    }

    pub fn root(&self) -> GroupId {
        GroupId(0)
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    /// None only for the root group.
    pub fn parent(&self, id: GroupId) -> Option<GroupId> {
        self.group(id).parent
    }

    /// First direct child of `id` named exactly `name`.
    pub fn find_subgroup(&self, id: GroupId, name: &str) -> Option<GroupId> {
        self.group(id)
            .groups
            .iter()
            .copied()
            .find(|child| self.group(*child).name == name)
    }

    pub fn entry(&self, group: GroupId, index: usize) -> Option<&Entry> {
        self.group(group).entries.get(index)
    }

    /// Append a new child group and return its handle.
    pub fn new_subgroup(&mut self, parent: GroupId, name: &str) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group::new(name, Some(parent)));
        self.groups[parent.0].groups.push(id);
        self.dirty = true;
        id
    }

    /// Append an entry to `group` and return its position.
    pub fn add_entry(&mut self, group: GroupId, entry: Entry) -> usize {
        let entries = &mut self.groups[group.0].entries;
        entries.push(entry);
        self.dirty = true;
        entries.len() - 1
    }

    /// Set a field on an existing entry. Returns None when the entry does not
    /// exist, otherwise whether a previous value was replaced.
    pub fn set_entry_field(
        &mut self,
        group: GroupId,
        index: usize,
        field: &str,
        value: Value,
    ) -> Option<bool> {
        let entry = self.groups[group.0].entries.get_mut(index)?;
        let replaced = entry.set(field, value);
        self.dirty = true;
        Some(replaced)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Slash-joined names from the root down to `id`, e.g. `/email/work`.
    pub fn path_of(&self, id: GroupId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            names.push(self.group(current).name.as_str());
            current = parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }
}

/// root
/// ├── email/
/// │   └── 0: gmail
/// ├── a/
/// │   └── b/
/// │       └── 0: deep
/// ├── 0: mail
/// └── 1: bank
#[cfg(test)]
pub(crate) fn sample_database() -> Database {
    let mut db = Database::new("root");
    let root = db.root();
    let email = db.new_subgroup(root, "email");
    db.add_entry(email, Entry::titled("gmail"));
    let a = db.new_subgroup(root, "a");
    let b = db.new_subgroup(a, "b");
    db.add_entry(b, Entry::titled("deep"));
    db.add_entry(root, Entry::titled("mail"));
    db.add_entry(root, Entry::titled("bank"));
    db.mark_clean();
    db
}
