mod test_helpers;

use std::io::Write;
use tempfile::NamedTempFile;

pub(super) const TASKS_SCHEMA: &str = r#"
tables:
  - name: users
    columns:
      - name: id
        type: guid
    primary_key: [id]
    federation:
      name: UserFed
      distribution_name: user_id
      column: id
  - name: tasks
    columns:
      - name: id
        type: guid
      - name: user_id
        type: guid
    primary_key: [id]
    foreign_keys:
      - name: fk_tasks_users
        columns: [user_id]
        foreign_table: users
        foreign_columns: [id]
    federation:
      name: UserFed
      distribution_name: user_id
      column: user_id
  - name: countries
    columns:
      - name: code
        type: string
        length: 2
    primary_key: [code]
"#;

pub(super) fn schema_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write schema");
    file
}

pub(super) fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is UTF-8")
}
