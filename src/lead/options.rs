//! Fixed option lists offered by the form.

/// Product categories a campaign can request. Submitted products must be
/// drawn from this list, using the exact labels.
pub const PRODUCT_OPTIONS: [&str; 6] = [
    "Apparel (T-shirts, Polos, Hats)",
    "Rally & Field (Signs, Banners, Buttons)",
    "Handouts (Brochures, Palm Cards, Flyers)",
    "Vehicle & Large Format (Magnets, Billboards)",
    "VIP/Donor (Premium Items, Custom Gifts)",
    "Custom/Other",
];

/// US postal codes offered by the state selector.
pub const STATE_OPTIONS: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

pub fn is_product_option(label: &str) -> bool {
    PRODUCT_OPTIONS.contains(&label)
}

pub fn is_state_option(code: &str) -> bool {
    STATE_OPTIONS.contains(&code)
}
