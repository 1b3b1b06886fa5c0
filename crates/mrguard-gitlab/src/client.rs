use crate::api::{MergeRequestChangesDto, MergeRequestDto};
use anyhow::Context;
use mrguard_domain::vcs::{MrDetails, MrFileChange, VcsError, VersionControl};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

const USER_AGENT: &str = concat!("mrguard/", env!("CARGO_PKG_VERSION"));

/// Blocking GitLab REST v4 client.
pub struct GitLabClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitLabClient {
    /// `base_url` is the instance root, e.g. `https://gitlab.com`.
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid GitLab URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("GitLab URL cannot be used as a base: {base_url}");
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// `{base}/api/v4/{segments...}`, each segment percent-encoded (so `a/b.yaml` becomes `a%2Fb.yaml`).
    pub(crate) fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").push("v4").extend(segments);
        }
        url
    }

    pub(crate) fn file_url(&self, project_id: u64, path: &str, git_ref: &str) -> Url {
        let project = project_id.to_string();
        let mut url = self.api_url(&["projects", &project, "repository", "files", path, "raw"]);
        url.query_pairs_mut().append_pair("ref", git_ref);
        url
    }

    fn get(&self, url: Url, context: &str) -> Result<Response, VcsError> {
        debug!(url = %url, "GET");
        let mut req = self.http.get(url);
        if let Some(token) = &self.token {
            req = req.header("private-token", token);
        }
        req.send().map_err(|err| VcsError::request(context, err))
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, VcsError> {
        let resp = self.get(url, context)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(VcsError::request(context, format!("HTTP {status}")));
        }
        resp.json::<T>().map_err(|err| VcsError::request(context, err))
    }

    fn merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequestDto, VcsError> {
        let project = project_id.to_string();
        let iid = mr_iid.to_string();
        let url = self.api_url(&["projects", &project, "merge_requests", &iid]);
        self.get_json(url, &format!("get merge request {mr_iid} of project {project_id}"))
    }
}

impl VersionControl for GitLabClient {
    fn target_branch(&self, project_id: u64, mr_iid: u64) -> Result<String, VcsError> {
        Ok(self.merge_request(project_id, mr_iid)?.target_branch)
    }

    fn mr_details(&self, project_id: u64, mr_iid: u64) -> Result<MrDetails, VcsError> {
        Ok(self.merge_request(project_id, mr_iid)?.into())
    }

    fn fetch_file(&self, project_id: u64, path: &str, git_ref: &str) -> Result<String, VcsError> {
        let context = format!("fetch {path} at {git_ref} from project {project_id}");
        let resp = self.get(self.file_url(project_id, path, git_ref), &context)?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(VcsError::NotFound {
                project_id,
                path: path.to_string(),
                git_ref: git_ref.to_string(),
            }),
            status if status.is_success() => {
                resp.text().map_err(|err| VcsError::request(&context, err))
            }
            status => Err(VcsError::request(context, format!("HTTP {status}"))),
        }
    }

    fn mr_changes(&self, project_id: u64, mr_iid: u64) -> Result<Vec<MrFileChange>, VcsError> {
        let project = project_id.to_string();
        let iid = mr_iid.to_string();
        let url = self.api_url(&["projects", &project, "merge_requests", &iid, "changes"]);
        let context = format!("list changes of merge request {mr_iid} in project {project_id}");
        let dto: MergeRequestChangesDto = self.get_json(url, &context)?;
        if dto.overflow {
            return Err(VcsError::request(context, "change list truncated by the host"));
        }
        Ok(dto.changes.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_api_urls_under_base_path() {
        let client = GitLabClient::new("https://gitlab.example.com/", None).expect("client");
        assert_eq!(
            client.api_url(&["projects", "12", "merge_requests", "2042"]).as_str(),
            "https://gitlab.example.com/api/v4/projects/12/merge_requests/2042"
        );

        let nested = GitLabClient::new("https://example.com/gitlab", None).expect("client");
        assert_eq!(
            nested.api_url(&["projects", "1"]).as_str(),
            "https://example.com/gitlab/api/v4/projects/1"
        );
    }

    #[test]
    fn file_url_encodes_path_and_ref() {
        let client = GitLabClient::new("https://gitlab.example.com", None).expect("client");
        let url = client.file_url(12, "dataproducts/ebs/dev/product.yaml", "feature/shrink");
        assert_eq!(
            url.as_str(),
            "https://gitlab.example.com/api/v4/projects/12/repository/files/dataproducts%2Febs%2Fdev%2Fproduct.yaml/raw?ref=feature%2Fshrink"
        );
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(GitLabClient::new("not a url", None).is_err());
        assert!(GitLabClient::new("mailto:ops@example.com", None).is_err());
    }
}
