use anchor_lang::prelude::*;

/// Read an account that may not exist yet. The address is pinned by PDA
/// seeds in the accounts struct; an empty or foreign-owned account reads as
/// absent.
pub fn load_optional<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() || info.owner != &crate::ID {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let account = T::try_deserialize(&mut &data[..])?;
    Ok(Some(account))
}
