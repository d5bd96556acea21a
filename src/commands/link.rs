use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::{
    linker::{LinkOptions, LinkTarget, Linker},
    npm::PackageManager,
    runtime::Runtime,
};

/// Link a global module (or every manifest dependency) into a project.
#[tracing::instrument(skip(runtime, package_manager))]
pub async fn link<R: Runtime, P: PackageManager>(
    runtime: R,
    package_manager: P,
    module: &str,
    project: Option<PathBuf>,
    options: LinkOptions,
) -> Result<()> {
    let target = module.parse::<LinkTarget>()?;
    let project_dir = match project {
        Some(path) => path,
        None => runtime.current_dir()?,
    };
    debug!("Linking {} into {:?} with {:?}", target, project_dir, options);

    let linker = Linker::new(&runtime, &package_manager, options);
    let report = linker.link(&target, &project_dir).await?;

    debug!(
        "Processed {} module(s), linked {}, saved {:?}",
        report.outcomes.len(),
        report.linked_count(),
        report.manifest_path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npm::MockPackageManager;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{configure_mock_runtime_basics, test_global_root, test_project_dir};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_link_defaults_to_current_dir() {
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_basics(&mut runtime);

        let manifest = test_project_dir().join("package.json");
        runtime
            .expect_exists()
            .with(eq(test_global_root()))
            .returning(|_| true);
        runtime
            .expect_exists()
            .with(eq(manifest.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(manifest.clone()))
            .returning(|_| Ok(r#"{"devDependencies":{"vite":"^5.0.0"}}"#.to_string()));
        // node_modules/vite is already linked
        runtime
            .expect_exists()
            .with(eq(test_project_dir().join("node_modules/vite")))
            .returning(|_| true);
        runtime
            .expect_exists()
            .with(eq(test_project_dir().join("node_modules/vite/package.json")))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(test_project_dir().join("node_modules/vite/package.json")))
            .returning(|_| Ok(r#"{"version":"5.2.0"}"#.to_string()));
        runtime
            .expect_write()
            .with(eq(manifest), mockall::predicate::always())
            .times(1)
            .returning(|_, contents| {
                let saved: serde_json::Value = serde_json::from_slice(contents).unwrap();
                assert_eq!(saved["devDependencies"]["vite"], "^5.2.0");
                Ok(())
            });
        runtime.expect_link_dir().never();

        let mut pm = MockPackageManager::new();
        pm.expect_global_root().returning(|| Ok(test_global_root()));
        pm.expect_install_global().never();

        link(runtime, pm, "vite", None, LinkOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_link_rejects_empty_module_before_any_call() {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().never();
        runtime.expect_exists().never();
        let mut pm = MockPackageManager::new();
        pm.expect_global_root().never();

        let result = link(runtime, pm, "", None, LinkOptions::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_link_uses_explicit_project_dir() {
        let project = PathBuf::from("/elsewhere/app");
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().never();
        runtime
            .expect_exists()
            .with(eq(test_global_root()))
            .returning(|_| true);
        runtime
            .expect_exists()
            .with(eq(project.join("package.json")))
            .returning(|_| false);
        let mut pm = MockPackageManager::new();
        pm.expect_global_root().returning(|| Ok(test_global_root()));

        let err = link(runtime, pm, "vite", Some(project), LinkOptions::default())
            .await
            .unwrap_err();
        let err = err.downcast::<crate::Error>().unwrap();
        assert!(err.is_not_found());
    }
}
