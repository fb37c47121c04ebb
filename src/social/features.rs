use super::record::{count, SocialRecord};
use super::sentiment::{caption_sentiment, SentimentConfig};
use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Social activity metrics.
///
/// Averages and sentiment default to `0.0` without posts; `engagement` is
/// `None` whenever followers are unknown or zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SocialFeatures {
    pub followers: Option<f64>,
    pub following: Option<f64>,
    pub posts: Option<f64>,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub engagement: Option<f64>,
    pub sentiment: f64,
}

pub fn extract_social(
    record: &SocialRecord,
    sentiment: &SentimentConfig,
) -> Result<SocialFeatures, InputError> {
    let profile = &record.profile;
    let followers = first_nonzero(
        count(profile.followers.as_ref(), || "profile.followers".to_string())?,
        count(profile.followers_count.as_ref(), || {
            "profile.followers_count".to_string()
        })?,
    );
    let following = first_nonzero(
        count(profile.follows.as_ref(), || "profile.follows".to_string())?,
        count(profile.following.as_ref(), || "profile.following".to_string())?,
    );
    let posts_count = count(profile.posts_count.as_ref(), || {
        "profile.posts_count".to_string()
    })?;

    let mut likes = 0.0;
    let mut comments = 0.0;
    let mut sentiments = 0.0;
    for (index, post) in record.posts.iter().enumerate() {
        likes += post.like_count(index)?;
        comments += post.comment_count(index)?;
        sentiments += caption_sentiment(post.caption.as_deref().unwrap_or(""), sentiment);
    }

    let post_total = record.posts.len();
    let mean = |sum: f64| {
        if post_total == 0 {
            0.0
        } else {
            sum / post_total as f64
        }
    };
    let avg_likes = mean(likes);
    let avg_comments = mean(comments);

    let engagement = match followers {
        Some(f) if f > 0.0 => Some((avg_likes + avg_comments) / f),
        _ => None,
    };

    let posts = first_nonzero(posts_count, Some(post_total as f64));

    Ok(SocialFeatures {
        followers,
        following,
        posts,
        avg_likes,
        avg_comments,
        engagement,
        sentiment: mean(sentiments),
    })
}

/// The primary value unless it is missing or zero, then the fallback. A zero
/// primary survives when there is no fallback at all.
fn first_nonzero(primary: Option<f64>, fallback: Option<f64>) -> Option<f64> {
    match primary {
        Some(value) if value != 0.0 => Some(value),
        _ => fallback.or(primary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Cell;
    use crate::social::record::{Post, Profile};

    fn profile(followers: f64) -> Profile {
        Profile {
            followers: Some(Cell::Number(followers)),
            ..Profile::default()
        }
    }

    #[test]
    fn test_empty_record_defaults() {
        let features =
            extract_social(&SocialRecord::default(), &SentimentConfig::default()).unwrap();
        assert_eq!(features.followers, None);
        assert_eq!(features.posts, Some(0.0));
        assert_eq!(features.avg_likes, 0.0);
        assert_eq!(features.avg_comments, 0.0);
        assert_eq!(features.engagement, None);
        assert_eq!(features.sentiment, 0.0);
    }

    #[test]
    fn test_averages_and_engagement() {
        let record = SocialRecord {
            profile: profile(1000.0),
            posts: vec![
                Post::new(40.0, 5.0, "excelente atención"),
                Post::new(20.0, 15.0, "hubo un retraso"),
            ],
        };
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.avg_likes, 30.0);
        assert_eq!(features.avg_comments, 10.0);
        assert!((features.engagement.unwrap() - 0.04).abs() < 1e-12);
        assert_eq!(features.sentiment, 0.0);
        assert_eq!(features.posts, Some(2.0));
    }

    #[test]
    fn test_zero_followers_has_no_engagement() {
        let record = SocialRecord {
            profile: profile(0.0),
            posts: vec![Post::new(10.0, 1.0, "")],
        };
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.followers, Some(0.0));
        assert_eq!(features.engagement, None);
    }

    #[test]
    fn test_posts_count_prefers_profile() {
        let record = SocialRecord {
            profile: Profile {
                posts_count: Some(Cell::Number(250.0)),
                ..Profile::default()
            },
            posts: vec![Post::new(1.0, 0.0, "")],
        };
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.posts, Some(250.0));
    }

    #[test]
    fn test_zero_posts_count_falls_back_to_post_total() {
        let record = SocialRecord {
            profile: Profile {
                posts_count: Some(Cell::Number(0.0)),
                ..Profile::default()
            },
            posts: vec![Post::new(1.0, 0.0, ""), Post::new(2.0, 0.0, "")],
        };
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.posts, Some(2.0));
    }

    #[test]
    fn test_zero_followers_falls_back_to_followers_count() {
        let record = SocialRecord::from_json(
            r#"{"profile": {"followers": 0, "followers_count": 1500}, "posts": []}"#,
        )
        .unwrap();
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.followers, Some(1500.0));
        assert_eq!(features.posts, Some(0.0));
    }

    #[test]
    fn test_primary_profile_keys_win_when_non_zero() {
        let record = SocialRecord {
            profile: Profile {
                followers: Some(Cell::Number(800.0)),
                followers_count: Some(Cell::Number(1500.0)),
                following: Some(Cell::Text("45".to_string())),
                follows: Some(Cell::Number(300.0)),
                ..Profile::default()
            },
            posts: vec![Post::new(16.0, 0.0, "")],
        };
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.followers, Some(800.0));
        assert_eq!(features.following, Some(300.0));
        assert!((features.engagement.unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_missing_follows_uses_following() {
        let record = SocialRecord {
            profile: Profile {
                following: Some(Cell::Text("45".to_string())),
                ..Profile::default()
            },
            posts: vec![],
        };
        let features = extract_social(&record, &SentimentConfig::default()).unwrap();
        assert_eq!(features.following, Some(45.0));
    }

    #[test]
    fn test_invalid_profile_counter_is_structural() {
        let record = SocialRecord {
            profile: Profile {
                followers: Some(Cell::Text("mil".to_string())),
                ..Profile::default()
            },
            posts: vec![],
        };
        let err = extract_social(&record, &SentimentConfig::default()).unwrap_err();
        assert!(err.to_string().contains("profile.followers"));
    }
}
