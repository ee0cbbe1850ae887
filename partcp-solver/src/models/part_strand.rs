use log::debug;
use partcp_core::constraints;
use partcp_core::DomainId;
use partcp_core::ModelError;
use partcp_core::Store;

use super::declare_decision_variables;
use super::declare_parts;
use super::part_name;
use super::Model;

const POSITIVE_STRAND: i32 = 1;
const NEGATIVE_STRAND: i32 = -1;

/// Selects the parts which lie on the positive strand.
///
/// Odd parts lie on the positive strand and even parts on the negative strand. Every part `i`
/// has a variable `part-i.strand` which is tied to the strand of its parity, and every decision
/// variable has to hold a part whose strand equals `part.strand`, which is fixed to the positive
/// strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartStrand {
    pub num_variables: i32,
    pub num_parts: i32,
}

impl Default for PartStrand {
    fn default() -> Self {
        PartStrand {
            num_variables: 18,
            num_parts: 380,
        }
    }
}

/// The strand on which `part` lies.
fn strand_of(part: i32) -> i32 {
    if part % 2 == 1 {
        POSITIVE_STRAND
    } else {
        NEGATIVE_STRAND
    }
}

impl Model for PartStrand {
    fn build(&self, store: &mut Store) -> Result<Vec<DomainId>, ModelError> {
        let variables = declare_decision_variables(store, self.num_variables, self.num_parts)?;

        let strand = store.new_named_sparse_integer([NEGATIVE_STRAND], "part.strand")?;
        store.extend_domain(strand, POSITIVE_STRAND, POSITIVE_STRAND)?;

        // The facts: a part is tied to the strand of its parity.
        let parts = declare_parts(store, self.num_parts)?;
        let mut part_strands = Vec::with_capacity(parts.len());
        for (part_id, &part) in (1..).zip(&parts) {
            let part_strand = store.new_named_sparse_integer(
                [NEGATIVE_STRAND, POSITIVE_STRAND],
                format!("{}.strand", part_name(part_id)),
            )?;
            let is_part = store.new_boolean();

            let _ = store.impose(constraints::reified(
                constraints::equals(part_strand, strand_of(part_id)),
                is_part,
            ))?;
            let _ = store.impose(constraints::reified(
                constraints::equals(part, part_id),
                is_part,
            ))?;
            part_strands.push(part_strand);
        }

        // The query: every decision variable holds a part on the queried strand.
        for &variable in &variables {
            let on_strand = parts
                .iter()
                .zip(&part_strands)
                .map(|(&part, &part_strand)| {
                    constraints::and([
                        constraints::equals(part_strand, strand),
                        constraints::equals(variable, part),
                    ])
                })
                .collect::<Vec<_>>();
            let _ = store.impose(constraints::or(on_strand))?;
        }
        let _ = store.impose(constraints::equals(strand, POSITIVE_STRAND))?;

        debug!("{store}");
        Ok(variables)
    }
}
