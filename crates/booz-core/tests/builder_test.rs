mod common;

use booz_core::project::{NoProgress, Step, TemplateKind};
use booz_core::templates::RealFs;
use booz_core::{
    BackendStack, FrontendStack, PackageManager, ProjectBuilder, ProjectConfig, ScaffoldError,
    ScaffoldPlan, Stacks,
};
use common::{shipped_templates, write_tree, Event, RecordingProgress, RecordingRunner};
use std::path::Path;
use tempfile::TempDir;

fn plan_in(cwd: &Path, root: &Path, config: &ProjectConfig) -> ScaffoldPlan {
    ScaffoldPlan::new(config, root, cwd).unwrap()
}

#[tokio::test]
async fn test_frontend_react_project() {
    let cwd = TempDir::new().unwrap();
    let templates = shipped_templates();
    let config = ProjectConfig::new(
        "my app",
        Stacks::Frontend(FrontendStack::React),
        Some(PackageManager::Pnpm),
    );
    let plan = plan_in(cwd.path(), &templates, &config);
    let mut runner = RecordingRunner::default();

    let report = ProjectBuilder::new(RealFs, &mut runner, NoProgress)
        .build(&plan)
        .await
        .unwrap();

    let project = cwd.path().join("my-app");
    assert_eq!(report.project_dir, project);

    // templates are substituted with the name as typed
    let package = std::fs::read_to_string(project.join("package.json")).unwrap();
    assert!(package.contains(r#""name": "my app""#));
    assert!(!project.join("package.json.hbs").exists());

    // plain files are byte-identical
    assert_eq!(
        std::fs::read(project.join("src/main.tsx")).unwrap(),
        std::fs::read(templates.join("frontend/react/src/main.tsx")).unwrap()
    );

    assert_eq!(
        runner.calls(),
        vec![
            ("git init".to_string(), project.clone()),
            ("pnpm install".to_string(), project.clone()),
        ]
    );
    assert_eq!(report.installed, vec![project]);
    assert!(report.files() > 0);
}

#[tokio::test]
async fn test_fullstack_project_without_install() {
    let cwd = TempDir::new().unwrap();
    let templates = shipped_templates();
    let config = ProjectConfig::new(
        "shop",
        Stacks::Fullstack {
            frontend: FrontendStack::Vue,
            backend: BackendStack::Hono,
        },
        None,
    );
    let plan = plan_in(cwd.path(), &templates, &config);
    let mut runner = RecordingRunner::default();
    let mut progress = RecordingProgress::default();

    ProjectBuilder::new(RealFs, &mut runner, &mut progress)
        .build(&plan)
        .await
        .unwrap();

    let shop = cwd.path().join("shop");
    // Vue's own {{ count }} syntax lives in a plain file and is untouched
    assert_eq!(
        std::fs::read(shop.join("client/src/App.vue")).unwrap(),
        std::fs::read(templates.join("frontend/vue/src/App.vue")).unwrap()
    );
    let server = std::fs::read_to_string(shop.join("server/src/index.ts")).unwrap();
    assert!(server.contains("Hello from shop"));

    assert_eq!(runner.calls(), vec![("git init".to_string(), shop.clone())]);

    let client_step = Step::Render {
        kind: TemplateKind::Frontend,
        dest: shop.join("client"),
    };
    let server_step = Step::Render {
        kind: TemplateKind::Backend,
        dest: shop.join("server"),
    };
    let git_step = Step::GitInit { dir: shop };
    assert_eq!(
        progress.events,
        vec![
            Event::Started(client_step.clone()),
            Event::Finished(client_step),
            Event::Started(server_step.clone()),
            Event::Finished(server_step),
            Event::Started(git_step.clone()),
            Event::Finished(git_step),
        ]
    );
}

#[tokio::test]
async fn test_fullstack_installs_client_then_server() {
    let cwd = TempDir::new().unwrap();
    let config = ProjectConfig::new(
        "shop",
        Stacks::Fullstack {
            frontend: FrontendStack::NextJs,
            backend: BackendStack::NodeTs,
        },
        Some(PackageManager::Yarn),
    );
    let plan = plan_in(cwd.path(), &shipped_templates(), &config);
    let mut runner = RecordingRunner::default();

    ProjectBuilder::new(RealFs, &mut runner, NoProgress)
        .build(&plan)
        .await
        .unwrap();

    let shop = cwd.path().join("shop");
    assert_eq!(
        runner.calls(),
        vec![
            ("git init".to_string(), shop.clone()),
            ("yarn install".to_string(), shop.join("client")),
            ("yarn install".to_string(), shop.join("server")),
        ]
    );
}

#[tokio::test]
async fn test_missing_template_writes_nothing() {
    let cwd = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write_tree(root.path(), &[("frontend/react/index.html.hbs", "{{name}}")]);
    let config = ProjectConfig::new(
        "shop",
        Stacks::Fullstack {
            frontend: FrontendStack::React,
            backend: BackendStack::Hono,
        },
        Some(PackageManager::Npm),
    );
    let plan = plan_in(cwd.path(), root.path(), &config);
    let mut runner = RecordingRunner::default();

    let err = ProjectBuilder::new(RealFs, &mut runner, NoProgress)
        .build(&plan)
        .await
        .unwrap_err();

    match &err {
        ScaffoldError::TemplateNotFound { path } => {
            assert_eq!(path, &root.path().join("backend/hono"))
        }
        other => panic!("expected missing template, got {other:?}"),
    }
    assert!(err.to_string().contains("backend/hono"));
    assert!(!cwd.path().join("shop").exists());
    assert!(runner.commands.is_empty());
}

#[tokio::test]
async fn test_template_error_stops_before_git() {
    let cwd = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write_tree(
        root.path(),
        &[
            ("backend/hono/a.txt", "kept"),
            ("backend/hono/b.ts.hbs", "{{#if name}}unterminated"),
        ],
    );
    let config = ProjectConfig::new(
        "api",
        Stacks::Backend(BackendStack::Hono),
        Some(PackageManager::Npm),
    );
    let plan = plan_in(cwd.path(), root.path(), &config);
    let mut runner = RecordingRunner::default();
    let mut progress = RecordingProgress::default();

    let err = ProjectBuilder::new(RealFs, &mut runner, &mut progress)
        .build(&plan)
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::Template { .. }));
    // no rollback
    assert_eq!(
        std::fs::read_to_string(cwd.path().join("api/a.txt")).unwrap(),
        "kept"
    );
    assert!(runner.commands.is_empty());
    assert!(matches!(progress.events.last(), Some(Event::Failed(Step::Render { .. }))));
}

#[tokio::test]
async fn test_git_failure_skips_install() {
    let cwd = TempDir::new().unwrap();
    let config = ProjectConfig::new(
        "api",
        Stacks::Backend(BackendStack::NodeTs),
        Some(PackageManager::Pnpm),
    );
    let plan = plan_in(cwd.path(), &shipped_templates(), &config);
    let mut runner = RecordingRunner::failing("git");

    let err = ProjectBuilder::new(RealFs, &mut runner, NoProgress)
        .build(&plan)
        .await
        .unwrap_err();

    match err {
        ScaffoldError::Command { command, dir, .. } => {
            assert_eq!(command, "git init");
            assert_eq!(dir, cwd.path().join("api"));
        }
        other => panic!("expected command failure, got {other:?}"),
    }
    assert_eq!(runner.commands.len(), 1);
    assert!(cwd.path().join("api/package.json").exists());
}

#[tokio::test]
async fn test_install_failure_is_reported() {
    let cwd = TempDir::new().unwrap();
    let config = ProjectConfig::new(
        "web",
        Stacks::Frontend(FrontendStack::Vue),
        Some(PackageManager::Npm),
    );
    let plan = plan_in(cwd.path(), &shipped_templates(), &config);
    let mut runner = RecordingRunner::failing("npm");
    let mut progress = RecordingProgress::default();

    let err = ProjectBuilder::new(RealFs, &mut runner, &mut progress)
        .build(&plan)
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::Command { .. }));
    assert_eq!(
        progress.events.last(),
        Some(&Event::Failed(Step::Install {
            manager: PackageManager::Npm,
            dir: cwd.path().join("web"),
        }))
    );
}
