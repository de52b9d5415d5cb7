use std::{fs, io, path::Path, time::Duration};

pub const NET_CONNECT_TIMEOUT: Duration = Duration::from_millis(8 * 1000);

/// Agent config shared by the search client and the downloader.  Only the
/// connect phase is bounded; a hung response keeps the caller waiting.
pub fn default_ureq_agent_builder(
    proxy_url: Option<&str>,
) -> ureq::config::ConfigBuilder<ureq::typestate::AgentScope> {
    let mut agent = ureq::Agent::config_builder().timeout_connect(Some(NET_CONNECT_TIMEOUT));

    if let Some(proxy_url) = proxy_url {
        let proxy = ureq::Proxy::new(proxy_url).ok();
        if proxy.is_none() {
            log::error!("ignoring invalid proxy URL: {}", proxy_url);
        }
        agent = agent.proxy(proxy);
    }

    agent
}

pub fn default_ureq_agent(proxy_url: Option<&str>) -> ureq::Agent {
    default_ureq_agent_builder(proxy_url).build().into()
}

pub fn mkdir_if_not_exists(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).or_else(|err| {
        if err.kind() == io::ErrorKind::AlreadyExists {
            Ok(())
        } else {
            Err(err)
        }
    })
}
