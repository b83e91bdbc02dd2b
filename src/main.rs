use anyhow::Result;
use clap::Parser;
use std::collections::HashMap;
use std::path::Path;

use mono_bump::analyzer::BumpAnalyzer;
use mono_bump::boundary::BoundaryWarning;
use mono_bump::cascade::CascadeEngine;
use mono_bump::config;
use mono_bump::detect::{DetectorRegistry, ModuleDetector};
use mono_bump::domain::{BumpType, ModuleKind, Tag, Version};
use mono_bump::git::{Git2Repository, Repository};
use mono_bump::registry::ModuleRegistry;
use mono_bump::ui::{self, BumpPlanRow};
use mono_bump::update::{self, VersionUpdateStrategy};

#[derive(clap::Parser)]
#[command(
    name = "mono-bump",
    about = "Compute and publish per-module semantic versions from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Repository root to operate on")]
    path: String,

    #[arg(
        short,
        long,
        help = "Build-system adapter (gradle, maven, npm); auto-detected when omitted"
    )]
    adapter: Option<String>,

    #[arg(long, help = "Preview computed bumps without writing versions or tags")]
    dry_run: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Show detected modules and exit")]
    list_modules: bool,

    #[arg(long, help = "Do not create release tags")]
    skip_tags: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("mono-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load and validate configuration before touching anything else
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let rules = match config.validate() {
        Ok(rules) => rules,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let root = Path::new(&args.path);

    // Assemble the module graph
    let detectors = DetectorRegistry::from_config(&config);
    let detector = match detectors.resolve(args.adapter.as_deref(), root) {
        Ok(detector) => detector,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_status(&format!(
        "Reading modules with the {} adapter",
        detector.name()
    ));
    let project = match detector.read_project(root) {
        Ok(project) => project,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let adapter = project.adapter.clone();
    let registry = match ModuleRegistry::from_project(project) {
        Ok(registry) => registry,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.list_modules {
        ui::display_modules(&registry);
        return Ok(());
    }

    let repo = match Git2Repository::open(root) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    if !repo.is_working_directory_clean()? {
        ui::display_status("Working directory has uncommitted changes");
        if !args.force && !args.dry_run && !ui::confirm_action("Continue anyway?")? {
            println!("Operation cancelled by user.");
            return Ok(());
        }
    }

    // Per-module local bumps from path-filtered commit history
    let analyzer = BumpAnalyzer::new(rules.clone());
    let mut local_bumps = HashMap::new();
    let mut current_versions: HashMap<String, Option<Version>> = HashMap::new();

    for module in registry.modules() {
        let module_scope = match module.kind {
            ModuleKind::Root => None,
            ModuleKind::Module => Some(module.id.as_str()),
        };
        let path_scope = if module.path == "." {
            None
        } else {
            Some(module.path.as_str())
        };

        let last_tag = repo.last_tag_for_module(module_scope)?;
        let raw_commits = repo.commits_since_last_tag(module_scope, path_scope)?;
        let commits = analyzer.classify(&raw_commits, module);

        for commit in &commits {
            if !commit.is_conventional() && !commit.subject.is_empty() {
                ui::display_warning(&BoundaryWarning::MalformedCommit {
                    hash: commit.hash.clone(),
                    subject: commit.subject.clone(),
                });
            }
        }
        if commits.is_empty() {
            if let Some(tag) = &last_tag {
                ui::display_warning(&BoundaryWarning::NoNewCommits {
                    module: module.id.clone(),
                    latest_tag: tag.name.clone(),
                });
            }
        }

        local_bumps.insert(module.id.clone(), analyzer.analyze_commits(&commits));

        let current = last_tag
            .as_ref()
            .and_then(|tag| tag.version)
            .or(module.declared_version);
        current_versions.insert(module.id.clone(), current);
    }

    // Propagate across the dependency graph
    let engine = CascadeEngine::new(&registry, rules.dependency_rules);
    let outcome = engine.compute_final_bumps(&local_bumps)?;
    for warning in &outcome.warnings {
        ui::display_warning(warning);
    }

    // Assemble and show the plan
    let mut plan = Vec::new();
    for module in registry.modules() {
        let bump = outcome
            .bumps
            .get(module.id.as_str())
            .copied()
            .unwrap_or(BumpType::None);
        let current = current_versions
            .get(module.id.as_str())
            .copied()
            .flatten();
        let next = if bump == BumpType::None {
            None
        } else {
            // Modules without any released or declared version start at 0.1.0
            Some(match current {
                Some(version) => version.bump(bump),
                None => Version::new(0, 1, 0),
            })
        };
        plan.push(BumpPlanRow {
            module: module.id.clone(),
            current,
            bump,
            next,
        });
    }
    ui::display_bump_plan(&plan);

    let bumped: Vec<&BumpPlanRow> = plan.iter().filter(|row| row.bump != BumpType::None).collect();
    if bumped.is_empty() {
        ui::display_success("All modules are up to date; nothing to bump");
        return Ok(());
    }

    if args.dry_run {
        ui::display_status("Dry run: no versions written, no tags created");
        return Ok(());
    }

    if !args.force && !ui::confirm_action(&format!("Apply {} version bump(s)?", bumped.len()))? {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    // Persist new versions into the build manifests
    let strategy = update::strategy_for(&adapter, &config)?;
    for row in &bumped {
        let module = registry.get_module(&row.module)?;
        if let Some(next) = row.next {
            strategy.write_version(root, module, &next)?;
            ui::display_success(&format!("Updated {} to {}", module.id, next));
        }
    }

    // When the root bumped, repoint module parent references at it
    let root_module = registry.modules().find(|m| m.kind == ModuleKind::Root);
    let root_next = root_module.and_then(|m| {
        plan.iter()
            .find(|row| row.module == m.id)
            .and_then(|row| row.next)
    });
    if let (Some(root_module), Some(root_next)) = (root_module, root_next) {
        if let Some(root_artifact) = root_module.attributes.get("maven.artifact_id") {
            for module in registry.modules() {
                let parent = module.attributes.get("maven.parent_artifact_id");
                if module.kind == ModuleKind::Module && parent == Some(root_artifact) {
                    strategy.write_parent_version(root, module, &root_next)?;
                    ui::display_success(&format!(
                        "Updated parent reference of {} to {}",
                        module.id, root_next
                    ));
                }
            }
        }
    }

    // Tag each bumped module
    if !args.skip_tags {
        for row in &bumped {
            let module = registry.get_module(&row.module)?;
            if let Some(next) = row.next {
                let tag = match module.kind {
                    ModuleKind::Root => Tag::for_root(next),
                    ModuleKind::Module => Tag::for_module(&module.id, next),
                };
                repo.create_tag(&tag)?;
                ui::display_success(&format!("Created tag: {}", tag.name));
            }
        }
        ui::display_status("Commit the manifest changes and push the new tags to publish");
    }

    ui::display_success(&format!("Bumped {} module(s)", bumped.len()));
    Ok(())
}
