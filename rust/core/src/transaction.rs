// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! All-or-nothing units of work over a [`HostModel`].

use crate::error::Error;
use crate::host::HostModel;

/// Runs `f` inside a host transaction named `name`.
///
/// Commits when `f` returns `Ok`, rolls back when it returns `Err`. The error
/// from `f` is returned even if the rollback itself fails.
pub fn with_transaction<M, T, E, F>(model: &mut M, name: &str, f: F) -> Result<T, E>
where
    M: HostModel + ?Sized,
    E: From<Error>,
    F: FnOnce(&mut M) -> Result<T, E>,
{
    model.begin_transaction(name)?;

    match f(model) {
        Ok(value) => {
            model.commit_transaction()?;
            Ok(value)
        }
        Err(err) => {
            let _ = model.rollback_transaction();
            Err(err)
        }
    }
}
