use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwap;
use axum::async_trait;
use octocrab::models::{App, AppId, InstallationRepositories, Repository};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretVec};

use client::GithubRepositoryClient;

use crate::bot::event::IssueComment;
use crate::bot::{BotState, RepositoryClient, RepositoryState};
use crate::github::GithubRepoName;

pub mod client;

type GithubRepositoryState = RepositoryState<GithubRepositoryClient>;

type RepositoryMap = HashMap<GithubRepoName, Arc<GithubRepositoryState>>;

/// Provides access to the repositories in which the GitHub app is installed.
pub struct GithubAppState {
    app: App,
    client: Octocrab,
    repositories: ArcSwap<RepositoryMap>,
}

impl GithubAppState {
    /// Authenticates as the GitHub app with the given ID and loads its repositories.
    pub async fn load(app_id: AppId, private_key: SecretVec<u8>) -> anyhow::Result<GithubAppState> {
        let key = jsonwebtoken::EncodingKey::from_rsa_pem(private_key.expose_secret().as_ref())
            .context("Could not encode private key")?;

        let client = Octocrab::builder()
            .app(app_id, key)
            .build()
            .context("Could not create octocrab builder")?;

        let app = client
            .current()
            .app()
            .await
            .context("Could not load Github App")?;
        tracing::info!("Authenticated as GitHub app {}", app.html_url);

        let repositories = load_repositories(&client).await?;
        Ok(GithubAppState {
            app,
            client,
            repositories: ArcSwap::new(Arc::new(repositories)),
        })
    }
}

/// Loads repositories that are connected to the given GitHub App client.
/// Repositories that cannot be loaded are skipped.
pub async fn load_repositories(client: &Octocrab) -> anyhow::Result<RepositoryMap> {
    let installations = client
        .apps()
        .installations()
        .send()
        .await
        .context("Could not load app installations")?;

    let mut repositories = HashMap::default();
    for installation in installations {
        let Some(ref repositories_url) = installation.repositories_url else {
            continue;
        };
        let installation_client = client.installation(installation.id);

        let repos = match installation_client
            .get::<InstallationRepositories, _, ()>(repositories_url, None)
            .await
        {
            Ok(repos) => repos.repositories,
            Err(error) => {
                tracing::error!(
                    "Could not load repositories of installation {}: {error:?}",
                    installation.id
                );
                continue;
            }
        };

        for repo in repos {
            let full_name = repo.full_name.clone().unwrap_or_default();
            match create_repo_state(installation_client.clone(), repo).await {
                Ok(repo_state) => {
                    tracing::info!("Loaded repository {}", repo_state.repository);
                    if let Some(existing) =
                        repositories.insert(repo_state.repository.clone(), Arc::new(repo_state))
                    {
                        return Err(anyhow::anyhow!(
                            "Repository {} found in multiple installations!",
                            existing.repository
                        ));
                    }
                }
                Err(error) => {
                    tracing::error!("Could not load repository {full_name}: {error:?}");
                }
            }
        }
    }
    Ok(repositories)
}

async fn create_repo_state(
    repo_client: Octocrab,
    repo: Repository,
) -> anyhow::Result<GithubRepositoryState> {
    let Some(owner) = repo.owner else {
        return Err(anyhow::anyhow!("Repository {} has no owner", repo.name));
    };

    let name = GithubRepoName::new(&owner.login, &repo.name);
    tracing::info!("Found repository {name}");

    let client = GithubRepositoryClient {
        client: repo_client,
        repo_name: name.clone(),
    };

    // The configuration is loaded again for every command, this only reports problems early.
    match client.load_config().await {
        Ok(config) => tracing::info!("Loaded repository config for {name}: {config:#?}"),
        Err(error) => tracing::warn!("Invalid repository config for {name}: {error:?}"),
    }

    Ok(RepositoryState {
        repository: name,
        client,
    })
}

#[async_trait]
impl BotState<GithubRepositoryClient> for GithubAppState {
    fn is_comment_internal(&self, comment: &IssueComment) -> bool {
        comment.author.html_url == self.app.html_url
    }

    fn get_repo_state(&self, repo: &GithubRepoName) -> Option<Arc<GithubRepositoryState>> {
        self.repositories.load().get(repo).cloned()
    }

    /// Re-download information about repositories connected to this GitHub app.
    async fn reload_repositories(&self) -> anyhow::Result<()> {
        self.repositories
            .store(Arc::new(load_repositories(&self.client).await?));
        Ok(())
    }
}
