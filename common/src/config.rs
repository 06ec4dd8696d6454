pub const DEFAULT_IP_COLUMN: &str = "ip_address";
pub const DEFAULT_MAC_COLUMN: &str = "mac_address";
pub const DEFAULT_PREVIEW: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    /// 0 prints everything, 1 only the summary, 2 nothing but errors.
    pub quiet: u8,
    /// How many addresses the terminal preview shows.
    pub preview: usize,
    /// Separator for delimited text; `\t` for TSV.
    pub delimiter: u8,
    /// Header of the address column in tabular formats.
    pub ip_column: String,
    /// Header of the MAC column in tabular formats.
    pub mac_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            preview: DEFAULT_PREVIEW,
            delimiter: b',',
            ip_column: DEFAULT_IP_COLUMN.to_string(),
            mac_column: DEFAULT_MAC_COLUMN.to_string(),
        }
    }
}
