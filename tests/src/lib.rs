//! End-to-end checks across the collectors and the codec layer.

#[cfg(test)]
mod codec {
    mod integration;
}

#[cfg(test)]
mod collection {
    mod integration;
}
