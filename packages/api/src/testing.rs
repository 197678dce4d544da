//! In-process stand-in for the storefront backend.
//!
//! [`FakeBackend`] implements [`Transport`] over a small in-memory marketplace
//! and records every request it receives, so tests can assert both on what the
//! client did with a response and on which requests were (not) sent.
//!
//! Seeded users: `alice` / `pw123` with a balance of 100.00 and `bob` /
//! `pw456` with 50.00. Tokens are `token-<username>`; any other bearer value is
//! rejected with 401 on every route, like a JWT backend does.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use rust_decimal::Decimal;
use serde_json::{json, Value};
use store::UserProfile;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Body, Method, RawResponse, Transport};

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<State>>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<String, FakeUser>,
    products: BTreeMap<u64, FakeProduct>,
    notifications: Vec<FakeNotification>,
    transactions: Vec<Value>,
    next_id: u64,
    requests: Vec<ApiRequest>,
    overrides: HashMap<(Method, String), (u16, Value)>,
    offline: bool,
}

struct FakeUser {
    profile: UserProfile,
    password: String,
}

struct FakeProduct {
    id: u64,
    owner: String,
    name: String,
    description: String,
    price: Decimal,
    likes: BTreeSet<String>,
    comments: Vec<Value>,
}

struct FakeNotification {
    id: u64,
    to: String,
    from: Option<String>,
    message: String,
    read: bool,
}

type Reply = (u16, Value);

fn reply(status: u16, body: Value) -> Result<Reply, Reply> {
    Ok((status, body))
}

fn error(status: u16, message: &str) -> Reply {
    (status, json!({ "error": message }))
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.add_user("alice", "pw123", Decimal::new(10_000, 2));
        backend.add_user("bob", "pw456", Decimal::new(5_000, 2));
        backend
    }

    pub fn add_user(&self, username: &str, password: &str, balance: Decimal) {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.users.insert(
            username.to_string(),
            FakeUser {
                profile: UserProfile {
                    id,
                    username: username.to_string(),
                    email: format!("{username}@example.com"),
                    balance,
                },
                password: password.to_string(),
            },
        );
    }

    pub fn token_for(&self, username: &str) -> String {
        format!("token-{username}")
    }

    /// Current profile of a seeded or registered user.
    pub fn profile(&self, username: &str) -> UserProfile {
        self.state.borrow().users[username].profile.clone()
    }

    pub fn add_product(&self, owner: &str, name: &str, price: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.products.insert(
            id,
            FakeProduct {
                id,
                owner: owner.to_string(),
                name: name.to_string(),
                description: format!("{name} in good condition"),
                price: price.parse().unwrap_or_default(),
                likes: BTreeSet::new(),
                comments: Vec::new(),
            },
        );
        id
    }

    pub fn notify(&self, to: &str, message: &str) {
        self.state.borrow_mut().push_notification(to, None, message);
    }

    /// Answer `method path` with a canned response instead of the simulation.
    pub fn respond_with(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state
            .borrow_mut()
            .overrides
            .insert((method, path.to_string()), (status, body));
    }

    /// Fail every request with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if state.offline {
            return Err(ApiError::Network("connection refused".to_string()));
        }

        let canned = state
            .overrides
            .get(&(request.method, request.path.clone()))
            .cloned();
        let (status, body) = match canned {
            Some(canned) => canned,
            None => state.handle(&request).unwrap_or_else(|rejection| rejection),
        };
        Ok(RawResponse {
            status,
            body: serde_json::to_vec(&body).unwrap_or_default(),
        })
    }
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn push_notification(&mut self, to: &str, from: Option<&str>, message: &str) {
        let id = self.next_id();
        self.notifications.push(FakeNotification {
            id,
            to: to.to_string(),
            from: from.map(str::to_string),
            message: message.to_string(),
            read: false,
        });
    }

    fn user_ref(&self, username: &str) -> Value {
        let id = self.users.get(username).map(|u| u.profile.id).unwrap_or(0);
        json!({ "id": id, "username": username })
    }

    /// `Ok(None)` for anonymous requests, 401 for unknown tokens.
    fn viewer(&self, request: &ApiRequest) -> Result<Option<String>, Reply> {
        let Some(token) = &request.bearer else {
            return Ok(None);
        };
        token
            .strip_prefix("token-")
            .filter(|name| self.users.contains_key(*name))
            .map(|name| Some(name.to_string()))
            .ok_or((
                401,
                json!({ "detail": "Given token not valid for any token type" }),
            ))
    }

    fn require_viewer(&self, request: &ApiRequest) -> Result<String, Reply> {
        self.viewer(request)?.ok_or((
            401,
            json!({ "detail": "Authentication credentials were not provided." }),
        ))
    }

    fn product_json(&self, product: &FakeProduct, viewer: Option<&str>) -> Value {
        json!({
            "id": product.id,
            "name": product.name,
            "desc": product.description,
            "price": product.price.to_string(),
            "image": format!("http://localhost:8000/media/products/{}.png", product.id),
            "user": self.user_ref(&product.owner),
            "created_at": "2024-01-20T10:30:00Z",
            "like_count": product.likes.len(),
            "comment_count": product.comments.len(),
            "is_liked_by_user": viewer.is_some_and(|v| product.likes.contains(v)),
            "is_owner": viewer == Some(product.owner.as_str()),
            "comments": product.comments,
        })
    }

    fn handle(&mut self, request: &ApiRequest) -> Result<Reply, Reply> {
        let path = request.path.trim_matches('/');
        let segments: Vec<&str> = path.split('/').collect();
        let id = segments.get(1).and_then(|s| s.parse::<u64>().ok());

        match (request.method, segments.as_slice(), id) {
            (Method::Post, ["register"], _) => self.register(request),
            (Method::Post, ["token"], _) => self.login(request),
            (Method::Get, ["auth", "user"], _) => {
                let me = self.require_viewer(request)?;
                reply(200, json!(self.users[&me].profile))
            }
            (Method::Post, ["logout"], _) => {
                self.require_viewer(request)?;
                reply(200, json!({ "message": "Logged out" }))
            }
            (Method::Get, ["products", "public"], _) => {
                let viewer = self.viewer(request)?;
                reply(200, self.product_list(viewer.as_deref(), |_| true))
            }
            (Method::Get, ["products"], _) => self.filtered_products(request),
            (Method::Post, ["products", "create"], _) => self.create_product(request),
            (Method::Get, ["products", _], Some(id)) => {
                let viewer = self.viewer(request)?;
                let product = self.products.get(&id).ok_or_else(|| error(404, "Not found"))?;
                reply(200, self.product_json(product, viewer.as_deref()))
            }
            (Method::Delete, ["products", _], Some(id)) => {
                let me = self.require_viewer(request)?;
                let product = self.products.get(&id).ok_or_else(|| error(404, "Not found"))?;
                if product.owner != me {
                    return Err(error(403, "Not allowed"));
                }
                self.products.remove(&id);
                reply(200, json!({ "message": "Deleted" }))
            }
            (Method::Post, ["products", _, "like"], Some(id)) => self.like(request, id),
            (Method::Post, ["products", _, "comment"], Some(id)) => self.comment(request, id),
            (Method::Post, ["products", _, "buy"], Some(id)) => self.buy(request, id),
            (Method::Get, ["notifications"], _) => {
                let me = self.require_viewer(request)?;
                let list: Vec<Value> = self
                    .notifications
                    .iter()
                    .rev()
                    .filter(|n| n.to == me)
                    .map(|n| {
                        json!({
                            "id": n.id,
                            "message": n.message,
                            "from_user": n.from.as_deref().map(|f| self.user_ref(f)),
                            "to_user": self.users[&n.to].profile.id,
                            "status": if n.read { "read" } else { "unread" },
                            "created_at": "2024-01-21T14:20:00Z",
                        })
                    })
                    .collect();
                reply(200, json!(list))
            }
            (Method::Post, ["notifications", _, "read"], Some(id)) => {
                let me = self.require_viewer(request)?;
                let notification = self
                    .notifications
                    .iter_mut()
                    .find(|n| n.id == id && n.to == me)
                    .ok_or_else(|| error(404, "Not found"))?;
                notification.read = true;
                reply(200, json!({ "message": "Marked as read" }))
            }
            (Method::Get, ["transactions"], _) => {
                let me = self.require_viewer(request)?;
                let mine: Vec<&Value> = self
                    .transactions
                    .iter()
                    .filter(|tx| match tx["tx_type"].as_str() {
                        Some("withdraw") => tx["sender"]["username"] == me.as_str(),
                        _ => tx["receiver"]["username"] == me.as_str(),
                    })
                    .collect();
                reply(200, json!(mine))
            }
            _ => Err((404, json!({ "detail": "Not found." }))),
        }
    }

    fn register(&mut self, request: &ApiRequest) -> Result<Reply, Reply> {
        let Body::Json(body) = &request.body else {
            return Err(error(400, "Invalid data"));
        };
        let field = |key: &str| body[key].as_str().unwrap_or_default().to_string();
        let username = field("username");

        let mut errors = serde_json::Map::new();
        if username.is_empty() {
            errors.insert("username".into(), json!(["This field may not be blank."]));
        } else if self
            .users
            .keys()
            .any(|name| name.eq_ignore_ascii_case(&username))
        {
            errors.insert("username".into(), json!(["Username already exists"]));
        }
        let balance = field("balance").parse::<Decimal>();
        if balance.is_err() {
            errors.insert("balance".into(), json!(["A valid number is required."]));
        }
        if !errors.is_empty() {
            return Err((400, Value::Object(errors)));
        }

        let id = self.next_id();
        let profile = UserProfile {
            id,
            username: username.clone(),
            email: field("email"),
            balance: balance.unwrap_or_default(),
        };
        self.users.insert(
            username.clone(),
            FakeUser {
                profile: profile.clone(),
                password: field("password"),
            },
        );
        reply(201, json!({ "access": format!("token-{username}"), "user": profile }))
    }

    fn login(&self, request: &ApiRequest) -> Result<Reply, Reply> {
        let Body::Json(body) = &request.body else {
            return Err(error(400, "Invalid data"));
        };
        let username = body["username"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();
        match self.users.get(username) {
            Some(user) if user.password == password => reply(
                200,
                json!({
                    "access": format!("token-{username}"),
                    "refresh": format!("refresh-{username}"),
                    "user": user.profile,
                }),
            ),
            _ => Err((
                401,
                json!({ "detail": "No active account found with the given credentials" }),
            )),
        }
    }

    fn product_list(&self, viewer: Option<&str>, keep: impl Fn(&FakeProduct) -> bool) -> Value {
        let list: Vec<Value> = self
            .products
            .values()
            .filter(|&p| keep(p))
            .map(|p| self.product_json(p, viewer))
            .collect();
        json!(list)
    }

    fn filtered_products(&self, request: &ApiRequest) -> Result<Reply, Reply> {
        let viewer = self.viewer(request)?;
        let param = |key: &str| {
            request
                .query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        let bound = |key: &str| -> Result<Option<Decimal>, Reply> {
            param(key)
                .map(|v| {
                    v.parse::<Decimal>()
                        .map_err(|_| error(400, &format!("{key} must be a number")))
                })
                .transpose()
        };
        let min = bound("min_price")?;
        let max = bound("max_price")?;
        let mine = param("my_products") == Some("true");

        let list = self.product_list(viewer.as_deref(), |p| {
            min.map_or(true, |m| p.price >= m)
                && max.map_or(true, |m| p.price <= m)
                && (!mine || viewer.as_deref().map_or(true, |v| p.owner == v))
        });
        reply(200, list)
    }

    fn create_product(&mut self, request: &ApiRequest) -> Result<Reply, Reply> {
        let me = self.require_viewer(request)?;
        let Body::Multipart(form) = &request.body else {
            return Err(error(400, "Invalid data"));
        };

        let mut errors = serde_json::Map::new();
        let name = form.field("name").unwrap_or_default().trim().to_string();
        if name.is_empty() {
            errors.insert("name".into(), json!(["This field may not be blank."]));
        }
        let price = form.field("price").unwrap_or_default().parse::<Decimal>();
        if price.is_err() {
            errors.insert("price".into(), json!(["must be a number"]));
        }
        if form.file_part("image").is_none() {
            errors.insert("image".into(), json!(["No file was submitted."]));
        }
        if !errors.is_empty() {
            return Err((400, Value::Object(errors)));
        }

        let id = self.next_id();
        let product = FakeProduct {
            id,
            owner: me.clone(),
            name,
            description: form.field("desc").unwrap_or_default().to_string(),
            price: price.unwrap_or_default(),
            likes: BTreeSet::new(),
            comments: Vec::new(),
        };
        let body = self.product_json(&product, Some(&me));
        self.products.insert(id, product);
        reply(201, body)
    }

    fn like(&mut self, request: &ApiRequest, id: u64) -> Result<Reply, Reply> {
        let me = self.require_viewer(request)?;
        let product = self.products.get_mut(&id).ok_or_else(|| error(404, "Not found"))?;
        let liked = if product.likes.remove(&me) {
            false
        } else {
            product.likes.insert(me.clone());
            true
        };
        let owner = product.owner.clone();
        if liked && owner != me {
            self.push_notification(&owner, Some(&me), &format!("{me} liked your product"));
        }
        reply(200, json!({ "liked": liked }))
    }

    fn comment(&mut self, request: &ApiRequest, id: u64) -> Result<Reply, Reply> {
        let me = self.require_viewer(request)?;
        let content = match &request.body {
            Body::Json(body) => body["content"].as_str().unwrap_or_default().to_string(),
            _ => String::new(),
        };
        if content.is_empty() {
            return Err(error(400, "Comment cannot be empty"));
        }
        let comment_id = self.next_id();
        let comment = json!({
            "id": comment_id,
            "content": content,
            "user": self.user_ref(&me),
            "created_at": "2024-01-21T14:20:00Z",
        });
        let product = self.products.get_mut(&id).ok_or_else(|| error(404, "Not found"))?;
        product.comments.push(comment.clone());
        let owner = product.owner.clone();
        if owner != me {
            self.push_notification(&owner, Some(&me), &format!("{me} commented on your product"));
        }
        reply(201, comment)
    }

    fn buy(&mut self, request: &ApiRequest, id: u64) -> Result<Reply, Reply> {
        let me = self.require_viewer(request)?;
        let product = self.products.get(&id).ok_or_else(|| error(404, "Not found"))?;
        if product.owner == me {
            return Err(error(400, "You cannot buy your own product"));
        }
        let (price, seller) = (product.price, product.owner.clone());
        if self.users[&me].profile.balance < price {
            return Err(error(400, "Insufficient balance"));
        }

        if let Some(buyer) = self.users.get_mut(&me) {
            buyer.profile.balance -= price;
        }
        if let Some(owner) = self.users.get_mut(&seller) {
            owner.profile.balance += price;
        }
        for kind in ["withdraw", "deposit"] {
            let tx_id = self.next_id();
            let tx = json!({
                "id": tx_id,
                "product": id,
                "sender": self.user_ref(&me),
                "receiver": self.user_ref(&seller),
                "amount": price.to_string(),
                "tx_type": kind,
                "created_at": "2024-02-01T08:00:00Z",
            });
            self.transactions.push(tx);
        }
        self.push_notification(&seller, Some(&me), &format!("{me} bought your product"));

        let balance = self.users[&me].profile.balance;
        reply(
            200,
            json!({ "message": "Purchase successful", "balance": balance.to_string() }),
        )
    }
}
