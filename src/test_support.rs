use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::{
    bal::discord::role_manager::GuildMemberApi,
    dal::{dao::statsfm_dao::StatsfmApi, model::statsfm::StatsfmUser},
};

enum Lookup {
    Unlinked,
    Failing,
    Linked(Option<StatsfmUser>),
}

pub struct FakeStatsfm {
    lookup: Lookup,
    lookups: AtomicUsize,
    profiles: AtomicUsize,
}

impl FakeStatsfm {
    fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            lookups: AtomicUsize::new(0),
            profiles: AtomicUsize::new(0),
        }
    }

    pub fn unlinked() -> Self {
        Self::new(Lookup::Unlinked)
    }

    pub fn failing() -> Self {
        Self::new(Lookup::Failing)
    }

    pub fn linked(user: Option<StatsfmUser>) -> Self {
        Self::new(Lookup::Linked(user))
    }

    pub fn with_pronouns(pronouns: &str) -> Self {
        Self::linked(Some(StatsfmUser::with_pronouns(Some(pronouns))))
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profiles.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsfmApi for FakeStatsfm {
    async fn get_user_id_by_discord_id(&self, discord_id: &str) -> Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.lookup {
            Lookup::Unlinked => Ok(None),
            Lookup::Failing => bail!("connection reset"),
            Lookup::Linked(_) => Ok(Some(format!("statsfm-{}", discord_id))),
        }
    }

    async fn get_user_profile(&self, _user_id: &str) -> Result<Option<StatsfmUser>> {
        self.profiles.fetch_add(1, Ordering::SeqCst);
        match &self.lookup {
            Lookup::Linked(user) => Ok(user.clone()),
            _ => Ok(None),
        }
    }
}

pub type RoleCall = (String, String, Vec<String>);

#[derive(Default)]
pub struct FakeMembers {
    fail: bool,
    calls: Mutex<Vec<RoleCall>>,
}

impl FakeMembers {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RoleCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuildMemberApi for FakeMembers {
    async fn replace_member_roles(
        &self,
        guild_id: &str,
        user_id: &str,
        roles: &[String],
    ) -> Result<()> {
        self.calls.lock().unwrap().push((
            guild_id.to_string(),
            user_id.to_string(),
            roles.to_vec(),
        ));

        if self.fail {
            bail!("Discord API error: 500 Internal Server Error");
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RecordedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Answer exactly one HTTP request on a local port with `status` and `body`.
/// Returns the server's base URL and a handle resolving to what it received.
pub async fn serve_once(
    status: u16,
    body: &str,
) -> (String, tokio::task::JoinHandle<RecordedRequest>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response_body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();

        let content_length: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);

        let mut body = buf[header_end + 4..].to_vec();
        while body.len() < content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body was complete");
            body.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            response_body.len(),
            response_body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        RecordedRequest {
            request_line,
            headers,
            body: String::from_utf8_lossy(&body).to_string(),
        }
    });

    (base_url, handle)
}
