use super::cell_context::{CellContext, Corner};
use super::primitives::*;
use super::types::MeshSection;

/// Number of wall quads each configuration code emits.
pub const CASE_QUAD_COUNTS: [usize; 16] = [0, 1, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 1, 0];

/// Diagonal configurations: only two opposite corners solid.
pub fn is_saddle(case: u8) -> bool {
    case == 0b0101 || case == 0b1010
}

/// Generate the wall geometry for a single cell based on its 16-case configuration.
/// Returns the number of quads appended.
pub fn generate_cell(ctx: &CellContext, section: &mut MeshSection) -> usize {
    let start = section.quad_count();

    match ctx.case_index() {
        // Single solid corner
        0b0001 | 0b0010 | 0b0100 | 0b1000 => {
            if let Some(&solid) = Corner::ALL.iter().find(|&&c| ctx.is_solid(c)) {
                add_outer_corner(ctx, section, solid);
            }
        }
        // Two adjacent solid corners
        0b0011 | 0b0110 | 0b1100 | 0b1001 => {
            if let Some(&first) = Corner::ALL
                .iter()
                .find(|&&c| ctx.is_solid(c) && ctx.is_solid(c.ccw_next()))
            {
                add_straight_wall(ctx, section, first);
            }
        }
        // Saddles
        0b0101 => add_saddle(ctx, section, Corner::BottomLeft),
        0b1010 => add_saddle(ctx, section, Corner::BottomRight),
        // Single empty corner
        0b0111 | 0b1011 | 0b1101 | 0b1110 => {
            if let Some(&empty) = Corner::ALL.iter().find(|&&c| !ctx.is_solid(c)) {
                add_inner_corner(ctx, section, empty);
            }
        }
        // 0b0000 and 0b1111: no boundary through this cell
        _ => {}
    }

    section.quad_count() - start
}
