pub const LIST_USERS: &str = "list_users";
pub const GET_USER: &str = "get_user";
pub const CREATE_USER: &str = "create_user";
pub const UPDATE_USER: &str = "update_user";
pub const DELETE_USER: &str = "delete_user";
