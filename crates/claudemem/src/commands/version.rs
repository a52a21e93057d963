pub fn run() -> anyhow::Result<()> {
    println!("claudemem {}", env!("CARGO_PKG_VERSION"));
    println!("Client for the claude-mem persistent memory service");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
