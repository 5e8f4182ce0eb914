use std::thread::available_parallelism;

/// Build the default `User-Agent` header value.
///
/// ```not_rust
/// client-codec/<version> (<provider> - <os> - <arch> - <n> core(s))
/// ```
///
/// `provider` names the transport in use.
pub fn user_agent(provider: &str) -> String {
    let cores = available_parallelism().map(usize::from).unwrap_or(1);
    let mut buf = itoa::Buffer::new();

    let mut agent = String::with_capacity(64);
    agent.push_str(env!("CARGO_PKG_NAME"));
    agent.push('/');
    agent.push_str(env!("CARGO_PKG_VERSION"));
    agent.push_str(" (");
    agent.push_str(provider);
    agent.push_str(" - ");
    agent.push_str(std::env::consts::OS);
    agent.push_str(" - ");
    agent.push_str(std::env::consts::ARCH);
    agent.push_str(" - ");
    agent.push_str(buf.format(cores));
    agent.push_str(" core(s))");
    agent
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_user_agent() {
        let agent = user_agent("TokioProvider");
        let prefix = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"), " (TokioProvider - ");

        assert!(agent.starts_with(prefix), "{agent}");
        assert!(agent.contains(std::env::consts::OS));
        assert!(agent.contains(std::env::consts::ARCH));
        assert!(agent.ends_with(" core(s))"), "{agent}");

        let cores = available_parallelism().map(usize::from).unwrap_or(1);
        assert!(agent.ends_with(&format!(" - {cores} core(s))")), "{agent}");
    }
}
