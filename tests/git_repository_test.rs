// tests/git_repository_test.rs
//
// The git2-backed repository against real repositories built in temp dirs.

use git2::{Repository as Git2Repo, Signature};
use mono_bump::domain::{Tag, Version};
use mono_bump::git::{Git2Repository, Repository};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct TestRepo {
    dir: TempDir,
    repo: Git2Repo,
}

fn init_repo() -> TestRepo {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test Author").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    TestRepo { dir, repo }
}

fn commit_file(test_repo: &TestRepo, relative: &str, content: &str, message: &str) {
    let path = test_repo.dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();

    let mut index = test_repo.repo.index().unwrap();
    index.add_path(Path::new(relative)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = test_repo.repo.find_tree(tree_id).unwrap();

    let signature = Signature::now("Test Author", "test@example.com").unwrap();
    let parents = match test_repo.repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    test_repo
        .repo
        .commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )
        .unwrap();
}

fn create_tag(test_repo: &TestRepo, name: &str) {
    let head = test_repo.repo.head().unwrap().peel_to_commit().unwrap();
    test_repo
        .repo
        .tag_lightweight(name, head.as_object(), false)
        .unwrap();
}

#[test]
#[serial]
fn test_commits_since_last_tag_without_tags_returns_history() {
    let test_repo = init_repo();
    commit_file(&test_repo, "a.txt", "one", "feat: first");
    commit_file(&test_repo, "b.txt", "two", "fix: second");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();
    let commits = repo.commits_since_last_tag(None, None).unwrap();

    assert_eq!(commits.len(), 2);
    // Chronological order, oldest first
    assert_eq!(commits[0].message.trim(), "feat: first");
    assert_eq!(commits[1].message.trim(), "fix: second");
    assert_eq!(commits[0].author, "Test Author");
}

#[test]
#[serial]
fn test_commits_are_path_filtered() {
    let test_repo = init_repo();
    commit_file(&test_repo, "core/lib.rs", "a", "feat(core): core change");
    commit_file(&test_repo, "util/lib.rs", "b", "fix(util): util change");
    commit_file(&test_repo, "core/other.rs", "c", "fix(core): another core change");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();

    let core = repo.commits_since_last_tag(None, Some("core")).unwrap();
    assert_eq!(core.len(), 2);
    assert!(core.iter().all(|c| c.message.contains("core")));

    let util = repo.commits_since_last_tag(None, Some("util")).unwrap();
    assert_eq!(util.len(), 1);
}

#[test]
#[serial]
fn test_module_tag_bounds_the_commit_range() {
    let test_repo = init_repo();
    commit_file(&test_repo, "core/lib.rs", "a", "feat(core): released work");
    create_tag(&test_repo, "core-v1.0.0");
    commit_file(&test_repo, "core/lib.rs", "b", "fix(core): new work");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();
    let commits = repo
        .commits_since_last_tag(Some("core"), Some("core"))
        .unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message.trim(), "fix(core): new work");
}

#[test]
#[serial]
fn test_last_tag_is_scoped_per_module() {
    let test_repo = init_repo();
    commit_file(&test_repo, "a.txt", "a", "feat: work");
    create_tag(&test_repo, "v2.0.0");
    create_tag(&test_repo, "core-v1.1.0");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();

    let root = repo.last_tag_for_module(None).unwrap().unwrap();
    assert_eq!(root.version, Some(Version::new(2, 0, 0)));

    let core = repo.last_tag_for_module(Some("core")).unwrap().unwrap();
    assert_eq!(core.version, Some(Version::new(1, 1, 0)));

    assert!(repo.last_tag_for_module(Some("util")).unwrap().is_none());
}

#[test]
#[serial]
fn test_commits_in_range() {
    let test_repo = init_repo();
    commit_file(&test_repo, "a.txt", "1", "feat: one");
    create_tag(&test_repo, "start");
    commit_file(&test_repo, "b.txt", "2", "fix: two");
    commit_file(&test_repo, "c.txt", "3", "fix: three");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();
    let commits = repo.commits_in_range("start", "HEAD", None).unwrap();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].message.trim(), "fix: two");
}

#[test]
#[serial]
fn test_create_tag_and_list_tags() {
    let test_repo = init_repo();
    commit_file(&test_repo, "a.txt", "a", "feat: work");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();
    repo.create_tag(&Tag::for_module("core", Version::new(1, 0, 0)))
        .unwrap();

    let tags = repo.all_tags().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "core-v1.0.0");
    assert_eq!(tags[0].module, Some("core".to_string()));
}

#[test]
#[serial]
fn test_working_directory_cleanliness() {
    let test_repo = init_repo();
    commit_file(&test_repo, "a.txt", "committed", "feat: work");

    let repo = Git2Repository::open(test_repo.dir.path()).unwrap();
    assert!(repo.is_working_directory_clean().unwrap());

    fs::write(test_repo.dir.path().join("a.txt"), "modified").unwrap();
    assert!(!repo.is_working_directory_clean().unwrap());
}
