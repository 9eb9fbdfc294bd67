use get_prefix_linter::{collect_ruby_files, lint_files_parallel, write_fixes};
use get_prefix_linter::rules::get_enabled_rules;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_collect_and_fix_project() {
    let dir = TempDir::new().unwrap();
    let model = write(
        &dir,
        "app/models/user.rb",
        "class User\n  def get_user(id)\n    find(id)\n  end\nend\n",
    );
    let client = write(
        &dir,
        "app/clients/user_client.rb",
        "class UserClient\n  def get_user(id)\n    get(\"/users/#{id}\")\n  end\nend\n",
    );
    write(&dir, "vendor/bundle/gem.rb", "def get_x(a)\nend\n");
    write(&dir, "README.md", "def get_x(a)\n");

    let root = dir.path().to_string_lossy().to_string();
    let mut files = collect_ruby_files(&[root], &["vendor".to_string()]);
    files.sort();
    assert_eq!(files, vec![client.clone(), model.clone()]);

    let rules = get_enabled_rules(None);
    let results = lint_files_parallel(&files, &rules);
    let total: usize = results.iter().map(|r| r.violations.len()).sum();
    assert_eq!(total, 1);

    let mut fixed = 0;
    for result in &results {
        fixed += write_fixes(result).unwrap();
    }
    assert_eq!(fixed, 1);

    assert_eq!(
        fs::read_to_string(&model).unwrap(),
        "class User\n  def user_for(id)\n    find(id)\n  end\nend\n"
    );
    assert!(fs::read_to_string(&client).unwrap().contains("def get_user(id)"));

    let rerun = lint_files_parallel(&files, &rules);
    assert!(rerun.iter().all(|r| r.violations.is_empty()));
}

#[test]
fn test_disabled_rule_reports_nothing() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "user.rb", "def get_user(id)\nend\n");

    let none: Vec<String> = Vec::new();
    let rules = get_enabled_rules(Some(&none));
    let results = lint_files_parallel(&[model], &rules);
    assert!(results[0].violations.is_empty());
}

#[test]
fn test_unreadable_file_is_an_error_result() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.rb");

    let rules = get_enabled_rules(None);
    let results = lint_files_parallel(&[missing], &rules);
    assert!(results[0]
        .error
        .as_deref()
        .unwrap_or("")
        .starts_with("Failed to read file"));
}
