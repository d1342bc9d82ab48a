const SHOP_COLUMNS: usize = 7;
const SHOP_ROWS: usize = 3;
const SLOT_SPACING: u32 = 90;
const ORIGIN_X: u32 = 40;
const ORIGIN_Y: u32 = 80;

/// Top-left corner of every quick-buy slot, row by row.
pub const SHOP_LAYOUT: [(u32, u32); SHOP_ROWS * SHOP_COLUMNS] = shop_grid();

const fn shop_grid() -> [(u32, u32); SHOP_ROWS * SHOP_COLUMNS] {
    let mut slots = [(0, 0); SHOP_ROWS * SHOP_COLUMNS];
    let mut i = 0;
    while i < slots.len() {
        let column = (i % SHOP_COLUMNS) as u32;
        let row = (i / SHOP_COLUMNS) as u32;
        slots[i] = (ORIGIN_X + SLOT_SPACING * column, ORIGIN_Y + SLOT_SPACING * row);
        i += 1;
    }
    slots
}
