//! Built-in plan that scaffolds the sample application used by the test
//! suites of the admin framework.
//!
//! The plan is pure data: model schemas, file payloads, and collaborator
//! calls in a fixed order. Asset directories (`admin/`, `policies/`) are
//! copied from `assets_dir`, everything else is embedded here.

use std::collections::BTreeMap;
use std::path::Path;

use plank_core::domain::{
    Condition, FieldType, ModelSpec, Operation, Pattern, PlanSpec, RelativePath,
};

const POST_MODEL: &str = "\
class Post < ActiveRecord::Base
  belongs_to :category, foreign_key: :custom_category_id, {{OPTIONAL_BELONGS_TO}}
  belongs_to :author, class_name: 'User', {{OPTIONAL_BELONGS_TO}}
  has_many :taggings
  accepts_nested_attributes_for :author
  accepts_nested_attributes_for :taggings, allow_destroy: true

  ransacker :custom_title_searcher do |parent|
    parent.table[:title]
  end

  ransacker :custom_created_at_searcher do |parent|
    parent.table[:created_at]
  end

  ransacker :custom_searcher_numeric, type: :numeric do
    # nothing to see here
  end

end
";

const POST_DECORATOR: &str = "\
class PostDecorator < Draper::Decorator
  delegate_all

  def decorator_method
    'A method only available on the decorator'
  end
end
";

const BLOG_POST_MODEL: &str = "\
class Blog::Post < ActiveRecord::Base
  belongs_to :category, foreign_key: :custom_category_id
  belongs_to :author, class_name: 'User'
  has_many :taggings
  accepts_nested_attributes_for :author
  accepts_nested_attributes_for :taggings, allow_destroy: true

end
";

const USER_MODEL: &str = "\
class User < ActiveRecord::Base
  class VIP < self
  end
  has_many :posts, foreign_key: 'author_id'
  has_one :profile
  accepts_nested_attributes_for :profile, allow_destroy: true
  accepts_nested_attributes_for :posts, allow_destroy: true

  ransacker :age_in_five_years, type: :numeric, formatter: proc { |v| v.to_i - 5 } do |parent|
    parent.table[:age]
  end

  def display_name
    \"\\#{first_name} \\#{last_name}\"
  end
end
";

const PROFILE_MODEL: &str = "\
class Profile < ActiveRecord::Base
  belongs_to :user
end
";

const CATEGORY_MODEL: &str = "\
class Category < ActiveRecord::Base
  has_many :posts, foreign_key: :custom_category_id
  has_many :authors, through: :posts
  accepts_nested_attributes_for :posts
end
";

const TAG_MODEL: &str = "\
class Tag < ActiveRecord::Base
end
";

const TAGGING_MODEL: &str = "\
class Tagging < ActiveRecord::Base
  belongs_to :post, {{OPTIONAL_BELONGS_TO}}
  belongs_to :tag, {{OPTIONAL_BELONGS_TO}}

  delegate :name, to: :tag, prefix: true
end
";

const TEST_ENV_REPLACEMENT: &str = "
  config.cache_classes = !ENV['CLASS_RELOADING']
  config.action_mailer.default_url_options = {host: 'example.com'}
  config.assets.precompile += %w( some-random-css.css some-random-js.js a/favicon.ico )

  config.active_record.maintain_test_schema = false
";

const EN_TRANSLATIONS: &str = "
  active_admin:
    resources:
      post:
        titles:
          index: 'All the posts'
";

const APPLICATION_CONFIG_INJECT: &str =
    "\n    config.action_controller.action_on_unpermitted_parameters = :raise\n";

/// The declared model schemas, in generation order.
pub fn sample_models() -> Vec<ModelSpec> {
    let post_fields = |model: ModelSpec| {
        model
            .field("title", FieldType::String)
            .field("body", FieldType::Text)
            .field("published_date", FieldType::Date)
            .field("author_id", FieldType::Integer)
            .field("position", FieldType::Integer)
            .field("custom_category_id", FieldType::Integer)
            .field("starred", FieldType::Boolean)
            .field("foo_id", FieldType::Integer)
    };

    vec![
        post_fields(ModelSpec::new("post")),
        post_fields(ModelSpec::new("blog/post")),
        ModelSpec::new("profile")
            .field("user_id", FieldType::Integer)
            .field("bio", FieldType::Text),
        ModelSpec::new("user")
            .field("type", FieldType::String)
            .field("first_name", FieldType::String)
            .field("last_name", FieldType::String)
            .field("username", FieldType::String)
            .field("age", FieldType::Integer),
        ModelSpec::new("publisher").without_migration().parent("User"),
        ModelSpec::new("category")
            .field("name", FieldType::String)
            .field("description", FieldType::Text),
        ModelSpec::new("store").field("name", FieldType::String),
        ModelSpec::new("tag").field("name", FieldType::String),
        ModelSpec::new("tagging")
            .field("post_id", FieldType::Integer)
            .field("tag_id", FieldType::Integer)
            .field("position", FieldType::Integer),
    ]
}

/// Build the sample-app plan.
///
/// `assets_dir` must contain the `admin/` and `policies/` resource
/// directories that get copied into the target.
pub fn sample_app_plan(assets_dir: &Path) -> PlanSpec {
    let mut spec = PlanSpec::new("sample_app");

    // Empty asset stubs referenced by the precompile list below.
    for stub in [
        "app/assets/stylesheets/some-random-css.css",
        "app/assets/javascripts/some-random-js.js",
        "app/assets/images/a/favicon.ico",
    ] {
        spec = spec.op(write(stub, "", false));
    }

    let models = sample_models();
    let model_file = |name: &str| -> Option<&'static str> {
        match name {
            "post" => Some(POST_MODEL),
            "blog/post" => Some(BLOG_POST_MODEL),
            "user" => Some(USER_MODEL),
            "profile" => Some(PROFILE_MODEL),
            "category" => Some(CATEGORY_MODEL),
            "tag" => Some(TAG_MODEL),
            "tagging" => Some(TAGGING_MODEL),
            _ => None,
        }
    };

    for model in &models {
        spec = spec.op(Operation::RunGenerator {
            kind: "model".into(),
            args: model.generator_args(),
        });
        // The generator's stub model files are replaced with richer bodies.
        if let Some(content) = model_file(&model.name) {
            spec = spec.op(write(
                &format!("app/models/{}.rb", model.name),
                content,
                true,
            ));
        }
        if model.name == "post" {
            spec = spec.op(write("app/models/post_decorator.rb", POST_DECORATOR, false));
        }
    }

    spec = spec
        .op(Operation::GsubReplace {
            path: "config/environments/test.rb".into(),
            pattern: Pattern::Regex(r"  config\.cache_classes = true".into()),
            replacement: TEST_ENV_REPLACEMENT.into(),
        })
        // Set up the admin framework itself.
        .op(Operation::RunGenerator {
            kind: "active_admin:install".into(),
            args: vec![],
        })
        // Force strong parameters to raise exceptions.
        .op(Operation::InjectAfterMarker {
            path: "config/application.rb".into(),
            marker: Pattern::Literal("class Application < Rails::Application".into()),
            content: APPLICATION_CONFIG_INJECT.into(),
        })
        .op(Operation::AppendFile {
            path: "config/locales/en.yml".into(),
            content: EN_TRANSLATIONS.into(),
        })
        .op(Operation::CopyDirectory {
            source: assets_dir.join("admin"),
            dest: RelativePath::from("app/admin"),
        })
        .op(Operation::CopyDirectory {
            source: assets_dir.join("policies"),
            dest: RelativePath::from("app/policies"),
        })
        .op_when(
            Operation::InjectAfterMarker {
                path: "config/routes.rb".into(),
                marker: Pattern::Regex(r".*routes\.draw do".into()),
                content: "\n  root to: redirect('admin')".into(),
            },
            Condition::EnvironmentIsNot("test".into()),
        )
        .op(Operation::RunShellTask {
            command: "db:drop db:create db:migrate".into(),
            env: app_env(),
        })
        .op_when(
            Operation::InjectAfterMarker {
                path: "config/database.yml".into(),
                marker: Pattern::Literal("test.sqlite3".into()),
                content: "{{TEST_ENV_SUFFIX}}".into(),
            },
            Condition::EnvironmentIs("test".into()),
        )
        .op_when(
            Operation::RunShellTask {
                command: "parallel:drop parallel:create parallel:load_schema".into(),
                env: app_env(),
            },
            Condition::EnvironmentIs("test".into()),
        );

    spec
}

fn write(path: &str, content: &str, force: bool) -> Operation {
    Operation::WriteFile {
        path: path.into(),
        content: content.into(),
        force,
    }
}

fn app_env() -> BTreeMap<String, String> {
    [("RAILS_ENV".to_string(), "{{ENVIRONMENT}}".to_string())]
        .into_iter()
        .collect()
}
