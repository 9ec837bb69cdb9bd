//! `tocidr`: subnet and netmask to CIDR notation.

use super::{
    string_arg, Arguments, Definition, Function, FunctionMetadata, Parameter, ParameterType, Value,
};
use crate::error::{FunctionError, NetmaskFault};
use crate::logging::CallContext;
use crate::models::{parse_ipv4, Ipv4, Netmask};

/// Convert a dotted-decimal subnet and netmask to the masked network in CIDR form.
///
/// ```
/// use foxfunx::functions::to_cidr;
/// assert_eq!(to_cidr("10.10.10.7", "255.255.255.0").unwrap().to_string(), "10.10.10.0/24");
/// ```
pub fn to_cidr(subnet: &str, netmask: &str) -> Result<Ipv4, FunctionError> {
    let addr = parse_ipv4(subnet).ok_or_else(|| FunctionError::InvalidSubnet {
        value: subnet.to_string(),
    })?;

    let mask_addr = parse_ipv4(netmask).ok_or_else(|| FunctionError::InvalidNetmask {
        value: netmask.to_string(),
        fault: NetmaskFault::Malformed,
    })?;

    let mask = Netmask::from_addr(mask_addr).ok_or_else(|| FunctionError::InvalidNetmask {
        value: netmask.to_string(),
        fault: NetmaskFault::NonContiguous,
    })?;

    Ok(Ipv4::from_subnet(addr, mask))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToCidr;

impl Function for ToCidr {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata {
            name: "tocidr".to_string(),
        }
    }

    fn definition(&self) -> Definition {
        Definition {
            summary: "`tocidr` converts subnet and netmask to the cidr format.".to_string(),
            description: "Given subnet and netmask, return subnet and netmask in the cidr format. Fails for invalid subnet or netmasks.".to_string(),
            parameters: vec![
                Parameter::string("subnet", "Network subnet"),
                Parameter::string("netmask", "Network mask"),
            ],
            return_type: ParameterType::String,
        }
    }

    fn run(&self, ctx: &CallContext<'_>, args: &Arguments) -> Result<Value, FunctionError> {
        let definition = self.definition();
        let subnet = string_arg(args, 0, &definition)?;
        let netmask = string_arg(args, 1, &definition)?;

        match to_cidr(subnet, netmask) {
            Ok(cidr) => {
                ctx.logger.debug(&format!("tocidr({subnet}, {netmask}) = {cidr}"));
                Ok(Value::String(cidr.to_string()))
            }
            Err(e) => {
                ctx.logger.error(&format!("failed to convert to cidr. Error: {e}"));
                Err(e)
            }
        }
    }
}
