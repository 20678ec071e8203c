//! Service lookup subcommand.

use crate::error::CliResult;
use crate::output;
use crate::services;
use crate::types::Port;
use clap::Parser;

/// Look up the well-known service for one or more ports.
#[derive(Parser, Debug)]
pub struct ServiceCommand {
    /// Port numbers to look up
    #[arg(value_name = "PORT", required = true, num_args = 1..)]
    pub ports: Vec<Port>,
}

impl ServiceCommand {
    pub fn execute(&self) -> CliResult<()> {
        for port in &self.ports {
            output::print_service(port.as_u16());
        }

        let unknown = unknown_ports(&self.ports);
        if !unknown.is_empty() {
            let list: Vec<String> = unknown.iter().map(u16::to_string).collect();
            output::print_warning(&format!(
                "No well-known service registered for port(s): {}",
                list.join(", ")
            ));
        }
        Ok(())
    }
}

/// Ports missing from both service tables, in argument order.
fn unknown_ports(ports: &[Port]) -> Vec<u16> {
    ports
        .iter()
        .map(|p| p.as_u16())
        .filter(|&p| !services::is_known_service(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ports_flagged() {
        let ports: Vec<Port> = [22, 9000, 443, 12345]
            .into_iter()
            .filter_map(Port::new)
            .collect();

        assert_eq!(unknown_ports(&ports), vec![9000, 12345]);
    }

    #[test]
    fn test_known_ports_not_flagged() {
        let ports: Vec<Port> = [21, 3389].into_iter().filter_map(Port::new).collect();
        assert!(unknown_ports(&ports).is_empty());
    }
}
